//! Discrete front panel buttons
//!
//! One bit per button, active-high. Polarity is normalized where the
//! raw lines are read, before any sample reaches the debouncer.

use core::ops::{BitAnd, BitOr, BitXor};

/// Bitmask of front panel buttons
///
/// Bit layout of a raw sample:
/// ```text
/// Bit   7            6            5               4
///       CURSOR_RIGHT | CURSOR_LEFT | OUTPUT_ENABLE | MODE
/// ```
/// Bits 2 and 3 carry the encoder phases on the board and are never set
/// here; the encoder has its own transition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    /// No button active
    pub const NONE: Self = Self(0);
    /// Constant voltage / constant current mode button
    pub const MODE: Self = Self(0x10);
    /// Output enable toggle button
    pub const OUTPUT_ENABLE: Self = Self(0x20);
    /// Move edit cursor one digit left
    pub const CURSOR_LEFT: Self = Self(0x40);
    /// Move edit cursor one digit right
    pub const CURSOR_RIGHT: Self = Self(0x80);
    /// Every button the panel reacts to
    pub const ALL: Self = Self(0xF0);

    /// Create a mask from raw bits, dropping bits that are not buttons
    #[cfg(test)]
    pub(crate) const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Check if every bit of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// Set or clear the bits of `button` depending on `active`
    #[must_use]
    pub const fn with(self, button: Self, active: bool) -> Self {
        if active {
            Self(self.0 | button.0)
        } else {
            Self(self.0 & !button.0)
        }
    }

    /// Build a mask from active-low line levels
    ///
    /// Each entry pairs a button with the level read from its line; a line
    /// reading low (`false`) means the button is pressed.
    pub fn from_active_low(levels: &[(Self, bool)]) -> Self {
        levels
            .iter()
            .fold(Self::NONE, |acc, &(button, high)| acc.with(button, !high))
    }
}

impl BitAnd for Buttons {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Buttons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for Buttons {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}
