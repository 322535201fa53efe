//! Input state shared between background tasks and the dispatcher
//!
//! The sampler tick and the encoder edge handler run at a higher priority
//! than the dispatcher and may preempt it at any point. Every access goes
//! through a critical section, so the debounce ring, the encoder pattern
//! and the refresh counter are never observed half-updated.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::buttons::Buttons;
use super::debounce::{Debouncer, Settled};
use super::encoder::{EncoderDecoder, Symbol, Turn};

/// Snapshot of everything the idle state decides on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inputs {
    /// Debounced button state and edges
    pub buttons: Settled,
    /// Encoder detent recorded and not yet consumed
    pub turn: Turn,
    /// Refresh interval has elapsed
    pub refresh_due: bool,
}

impl Inputs {
    /// Buttons pressed since the last poll
    pub fn pressed(&self) -> Buttons {
        self.buttons.pressed()
    }
}

struct InputState<const N: usize> {
    debouncer: Debouncer<N>,
    encoder: EncoderDecoder,
    /// Sample ticks since the last display refresh
    refresh_ticks: u16,
}

/// Input block written from interrupt context and read by the dispatcher
pub struct SharedInputs<const N: usize> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<InputState<N>>>,
}

impl<const N: usize> Default for SharedInputs<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SharedInputs<N> {
    /// Create an input block with every button released
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(InputState {
                debouncer: Debouncer::new(),
                encoder: EncoderDecoder::new(),
                refresh_ticks: 0,
            })),
        }
    }

    /// Record one periodic button sample and advance the refresh counter
    ///
    /// Called from the sampler tick.
    pub fn sample(&self, raw: Buttons) {
        self.inner.lock(|state| {
            let mut state = state.borrow_mut();
            state.debouncer.sample(raw);
            state.refresh_ticks = state.refresh_ticks.saturating_add(1);
        });
    }

    /// Record the phase state seen on an encoder edge
    ///
    /// Called from the encoder edge handler.
    pub fn record_transition(&self, symbol: Symbol) {
        self.inner
            .lock(|state| state.borrow_mut().encoder.record_transition(symbol));
    }

    /// Settle buttons, decode the encoder and check the refresh counter
    ///
    /// Neither the refresh counter nor the encoder pattern is reset here:
    /// the dispatcher restarts the counter when it refreshes and consumes
    /// the turn when it applies it.
    pub fn poll(&self, refresh_interval: u16) -> Inputs {
        self.inner.lock(|state| {
            let mut state = state.borrow_mut();
            Inputs {
                buttons: state.debouncer.settle(),
                turn: state.encoder.decode(),
                refresh_due: state.refresh_ticks >= refresh_interval,
            }
        })
    }

    /// Clear a decoded turn once it has been applied
    pub fn consume_turn(&self, turn: Turn) -> bool {
        self.inner
            .lock(|state| state.borrow_mut().encoder.consume(turn))
    }

    /// Restart the refresh interval
    pub fn restart_refresh_timer(&self) {
        self.inner.lock(|state| state.borrow_mut().refresh_ticks = 0);
    }

    /// Sample ticks since the last refresh
    #[cfg(test)]
    pub(crate) fn refresh_ticks(&self) -> u16 {
        self.inner.lock(|state| state.borrow().refresh_ticks)
    }

    /// Run `f` with the background producers held off
    ///
    /// Used for multi-step display writes that must not interleave with a
    /// sample tick.
    pub fn masked<R>(&self, f: impl FnOnce() -> R) -> R {
        self.inner.lock(|_| f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::encoder::RIGHT_PATTERN;

    const WINDOW: usize = 4;

    #[test]
    fn test_sample_then_poll() {
        let shared = SharedInputs::<WINDOW>::new();
        for _ in 0..WINDOW {
            shared.sample(Buttons::MODE);
        }

        let inputs = shared.poll(100);
        assert_eq!(inputs.pressed(), Buttons::MODE);
        assert_eq!(inputs.turn, Turn::None);
        assert!(!inputs.refresh_due);
    }

    #[test]
    fn test_refresh_counter() {
        let shared = SharedInputs::<WINDOW>::new();
        for _ in 0..9 {
            shared.sample(Buttons::NONE);
        }
        assert!(!shared.poll(10).refresh_due);

        shared.sample(Buttons::NONE);
        // Polling does not consume the refresh
        assert!(shared.poll(10).refresh_due);
        assert!(shared.poll(10).refresh_due);

        shared.restart_refresh_timer();
        assert_eq!(shared.refresh_ticks(), 0);
        assert!(!shared.poll(10).refresh_due);
    }

    #[test]
    fn test_encoder_transitions() {
        let shared = SharedInputs::<WINDOW>::new();
        for code in RIGHT_PATTERN {
            shared.record_transition(Symbol::new(code).unwrap());
        }
        assert_eq!(shared.poll(100).turn, Turn::Right);
        // Still pending until applied
        assert_eq!(shared.poll(100).turn, Turn::Right);

        assert!(shared.consume_turn(Turn::Right));
        assert_eq!(shared.poll(100).turn, Turn::None);
    }

    #[test]
    fn test_pulled_up_encoder_pins() {
        let shared = SharedInputs::<WINDOW>::new();
        // Left detent: (H,H) (L,H) (L,L) (H,L) (H,H) on the A/B pins
        for (a, b) in [(true, true), (false, true), (false, false), (true, false), (true, true)] {
            shared.record_transition(Symbol::from_active_low(a, b));
        }
        assert_eq!(shared.poll(100).turn, Turn::Left);
    }

    /// True if another thread cannot enter a critical section right now
    fn blocks_other_threads() -> bool {
        let other = std::thread::spawn(|| critical_section::with(|_| ()));
        std::thread::sleep(std::time::Duration::from_millis(50));
        !other.is_finished()
    }

    #[test]
    fn test_masked_holds_off_producers() {
        let shared = SharedInputs::<WINDOW>::new();
        let (value, blocked) = shared.masked(|| (42, blocks_other_threads()));
        assert_eq!(value, 42);
        assert!(blocked);
    }
}
