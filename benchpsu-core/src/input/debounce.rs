//! Switch debouncing
//!
//! A button reads "held" only if it was active in every one of the last
//! `N` samples. Contact bounce shorter than `N` sampling ticks never
//! reaches the dispatcher; the price is `N` ticks of press latency.

use heapless::HistoryBuffer;

use super::buttons::Buttons;

/// Result of one settle pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settled {
    /// Buttons active in every sample of the window
    pub held: Buttons,
    /// Buttons whose held state changed since the previous settle
    pub edges: Buttons,
}

impl Settled {
    /// Buttons that became held on this settle (press edges only)
    pub fn pressed(&self) -> Buttons {
        self.edges & self.held
    }
}

/// Window debouncer over the last `N` raw samples
///
/// The ring always holds exactly `N` entries; it starts filled with
/// released samples so no button reads held before `N` real samples.
pub struct Debouncer<const N: usize> {
    ring: HistoryBuffer<Buttons, N>,
    previous_held: Buttons,
}

impl<const N: usize> Default for Debouncer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Debouncer<N> {
    /// Create a debouncer with every button released
    pub fn new() -> Self {
        Self {
            ring: HistoryBuffer::new_with(Buttons::NONE),
            previous_held: Buttons::NONE,
        }
    }

    /// Append one raw sample, overwriting the oldest
    pub fn sample(&mut self, raw: Buttons) {
        self.ring.write(raw);
    }

    /// Buttons active in every sample currently in the window
    pub fn held(&self) -> Buttons {
        self.ring
            .as_slice()
            .iter()
            .fold(Buttons::ALL, |acc, &sample| acc & sample)
    }

    /// Compute the settled state and the change since the last call
    pub fn settle(&mut self) -> Settled {
        let held = self.held();
        let edges = held ^ self.previous_held;
        self.previous_held = held;
        Settled { held, edges }
    }
}
