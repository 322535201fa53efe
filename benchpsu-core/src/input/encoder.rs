//! Rotary encoder pattern decoding
//!
//! Every edge on either phase line records the 2-bit phase state at that
//! instant. One detent produces a full Gray cycle; the decoder compares the
//! last five recorded states against the two reference cycles.
//!
//! ```text
//! Right: 00 -> 01 -> 11 -> 10 -> 00    [0, 1, 3, 2, 0]
//! Left:  00 -> 10 -> 11 -> 01 -> 00    [0, 2, 3, 1, 0]
//! ```
//!
//! A matched pattern stays in place until the turn is consumed, so a detent
//! seen while a button takes priority is still there on the next pass, and
//! is acted on exactly once.

use heapless::HistoryBuffer;

/// Number of recorded phase states compared per decode
pub const PATTERN_LEN: usize = 5;

/// Reference sequence for one detent to the right
pub const RIGHT_PATTERN: [u8; PATTERN_LEN] = [0, 1, 3, 2, 0];

/// Reference sequence for one detent to the left
pub const LEFT_PATTERN: [u8; PATTERN_LEN] = [0, 2, 3, 1, 0];

/// Phase state code recorded on a transition
///
/// Always one of `0..=3`: bit 1 is phase A, bit 0 is phase B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Symbol(u8);

impl Symbol {
    /// Both phases low
    pub const IDLE: Self = Self(0);

    /// Build a symbol from the phase line levels (active-high)
    pub const fn from_levels(a: bool, b: bool) -> Self {
        Self(((a as u8) << 1) | b as u8)
    }

    /// Build a symbol from pulled-up phase lines
    ///
    /// The encoder contacts short the lines to ground, so a high level is
    /// an open contact. The rest position reads high on both lines and
    /// maps to [`Symbol::IDLE`].
    pub const fn from_active_low(a_high: bool, b_high: bool) -> Self {
        Self::from_levels(!a_high, !b_high)
    }

    /// Build a symbol from a raw code, rejecting codes above 3
    #[cfg(test)]
    pub(crate) const fn new(code: u8) -> Option<Self> {
        if code <= 3 {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Raw code
    pub const fn code(self) -> u8 {
        self.0
    }
}

/// Decoded rotation, recomputed on every dispatcher pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Turn {
    /// One detent counter-clockwise
    Left,
    /// One detent clockwise
    Right,
    /// No complete detent recorded
    #[default]
    None,
}

/// Encoder decoder over a circular buffer of the last five symbols
pub struct EncoderDecoder {
    pattern: HistoryBuffer<Symbol, PATTERN_LEN>,
}

impl Default for EncoderDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderDecoder {
    /// Create a decoder with an all-idle pattern
    pub fn new() -> Self {
        Self {
            pattern: HistoryBuffer::new_with(Symbol::IDLE),
        }
    }

    /// Record the phase state seen on one edge of either line
    pub fn record_transition(&mut self, symbol: Symbol) {
        self.pattern.write(symbol);
    }

    /// Compare the recorded pattern, oldest first, against both references
    ///
    /// Only an exact match of all five slots yields a turn. The pattern is
    /// left untouched; see [`EncoderDecoder::consume`].
    pub fn decode(&self) -> Turn {
        if self.matches(&RIGHT_PATTERN) {
            Turn::Right
        } else if self.matches(&LEFT_PATTERN) {
            Turn::Left
        } else {
            Turn::None
        }
    }

    /// Mark a decoded turn as handled
    ///
    /// Resets the buffer to idle symbols, which match neither reference.
    /// Does nothing unless the pattern still decodes as `turn`: an edge
    /// recorded since the decode has already shifted the match out.
    pub fn consume(&mut self, turn: Turn) -> bool {
        if turn != Turn::None && self.decode() == turn {
            self.pattern.clear_with(Symbol::IDLE);
            true
        } else {
            false
        }
    }

    fn matches(&self, reference: &[u8; PATTERN_LEN]) -> bool {
        self.pattern
            .oldest_ordered()
            .map(|symbol| symbol.code())
            .eq(reference.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record_all(decoder: &mut EncoderDecoder, codes: &[u8]) {
        for &code in codes {
            decoder.record_transition(Symbol::new(code).unwrap());
        }
    }

    #[test]
    fn test_symbol_from_levels() {
        assert_eq!(Symbol::from_levels(false, false).code(), 0);
        assert_eq!(Symbol::from_levels(false, true).code(), 1);
        assert_eq!(Symbol::from_levels(true, false).code(), 2);
        assert_eq!(Symbol::from_levels(true, true).code(), 3);
        assert!(Symbol::new(4).is_none());
    }

    #[test]
    fn test_pulled_up_detent_decodes() {
        let mut decoder = EncoderDecoder::new();
        // Right detent as read from the pulled-up phase pins
        let levels = [
            (true, true),
            (true, false),
            (false, false),
            (false, true),
            (true, true),
        ];
        for (a, b) in levels {
            decoder.record_transition(Symbol::from_active_low(a, b));
        }
        assert_eq!(decoder.decode(), Turn::Right);
        assert_eq!(Symbol::from_active_low(true, true), Symbol::IDLE);
    }

    #[test]
    fn test_right_detent() {
        let mut decoder = EncoderDecoder::new();
        record_all(&mut decoder, &RIGHT_PATTERN);
        assert_eq!(decoder.decode(), Turn::Right);
    }

    #[test]
    fn test_left_detent() {
        let mut decoder = EncoderDecoder::new();
        record_all(&mut decoder, &LEFT_PATTERN);
        assert_eq!(decoder.decode(), Turn::Left);
    }

    #[test]
    fn test_match_held_until_consumed() {
        let mut decoder = EncoderDecoder::new();
        record_all(&mut decoder, &RIGHT_PATTERN);
        assert_eq!(decoder.decode(), Turn::Right);
        assert_eq!(decoder.decode(), Turn::Right);

        assert!(!decoder.consume(Turn::Left));
        assert!(decoder.consume(Turn::Right));
        assert_eq!(decoder.decode(), Turn::None);
        assert!(!decoder.consume(Turn::Right));
    }

    #[test]
    fn test_consume_after_new_edge_is_noop() {
        let mut decoder = EncoderDecoder::new();
        record_all(&mut decoder, &RIGHT_PATTERN);
        let turn = decoder.decode();
        // Next detent starts before the first one is handled
        record_all(&mut decoder, &[1]);
        assert!(!decoder.consume(turn));
        assert_eq!(decoder.decode(), Turn::None);
    }

    #[test]
    fn test_consecutive_detents() {
        let mut decoder = EncoderDecoder::new();
        // The trailing idle of one detent is the leading idle of the next
        record_all(&mut decoder, &RIGHT_PATTERN);
        assert!(decoder.consume(Turn::Right));
        record_all(&mut decoder, &RIGHT_PATTERN[1..]);
        assert!(decoder.consume(Turn::Right));
        record_all(&mut decoder, &LEFT_PATTERN[1..]);
        assert_eq!(decoder.decode(), Turn::Left);
    }

    #[test]
    fn test_partial_pattern() {
        let mut decoder = EncoderDecoder::new();
        record_all(&mut decoder, &[0, 1, 3]);
        assert_eq!(decoder.decode(), Turn::None);
    }

    #[test]
    fn test_rotated_pattern_rejected() {
        let mut decoder = EncoderDecoder::new();
        // Same cycle, wrong starting point
        record_all(&mut decoder, &[1, 3, 2, 0, 1]);
        assert_eq!(decoder.decode(), Turn::None);
    }

    #[test]
    fn test_bounce_in_the_middle() {
        let mut decoder = EncoderDecoder::new();
        record_all(&mut decoder, &[0, 1, 0, 1, 3]);
        assert_eq!(decoder.decode(), Turn::None);
    }

    proptest! {
        #[test]
        fn prop_decode_iff_exact_match(codes in proptest::collection::vec(0u8..4, 5..20)) {
            let mut decoder = EncoderDecoder::new();
            record_all(&mut decoder, &codes);

            let tail = &codes[codes.len() - PATTERN_LEN..];
            let expected = if tail == RIGHT_PATTERN {
                Turn::Right
            } else if tail == LEFT_PATTERN {
                Turn::Left
            } else {
                Turn::None
            };
            prop_assert_eq!(decoder.decode(), expected);
        }
    }
}
