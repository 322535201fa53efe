//! Set-point model
//!
//! Owns the voltage and current set-points and the edit cursor that
//! selects which decimal digit an encoder detent changes. Every mutation
//! is clamped to the configured range; values never wrap.

pub mod columns;
pub mod cursor;

pub use columns::{Channel, EditableColumn, EDITABLE_COLUMNS};
pub use cursor::Cursor;

use crate::config::SetPointRange;
use crate::input::Turn;

/// One set-point with its allowed range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetPoint {
    value: u16,
    min: u16,
    max: u16,
}

impl SetPoint {
    /// Create a set-point, clamping `value` into `[min, max]`
    pub fn new(value: u16, min: u16, max: u16) -> Self {
        let max = max.max(min);
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    /// Create a set-point from its configured range and power-on value
    pub fn from_range(range: &SetPointRange) -> Self {
        Self::new(range.initial, range.min, range.max)
    }

    /// Current value
    pub fn value(&self) -> u16 {
        self.value
    }

    /// Add `step`, saturating at the maximum
    pub fn step_up(&mut self, step: u16) {
        self.value = self.value.saturating_add(step).min(self.max);
    }

    /// Subtract `step`, saturating at the minimum
    pub fn step_down(&mut self, step: u16) {
        self.value = self.value.saturating_sub(step).max(self.min);
    }
}

/// Voltage and current set-points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetPoints {
    /// Output voltage in centivolts
    pub voltage: SetPoint,
    /// Current limit in milliamps
    pub current: SetPoint,
}

impl SetPoints {
    /// Create both set-points from their configured ranges
    pub fn from_ranges(voltage: &SetPointRange, current: &SetPointRange) -> Self {
        Self {
            voltage: SetPoint::from_range(voltage),
            current: SetPoint::from_range(current),
        }
    }

    /// Mutable set-point for a channel
    pub fn get_mut(&mut self, channel: Channel) -> &mut SetPoint {
        match channel {
            Channel::Voltage => &mut self.voltage,
            Channel::Current => &mut self.current,
        }
    }

    /// Apply one encoder detent at the cursor position
    ///
    /// `Right` adds the column's step, `Left` removes it; `None` does
    /// nothing.
    pub fn apply_turn(&mut self, cursor: Cursor, turn: Turn) {
        let entry = cursor.entry();
        let setpoint = self.get_mut(entry.channel);
        match turn {
            Turn::Right => setpoint.step_up(entry.step),
            Turn::Left => setpoint.step_down(entry.step),
            Turn::None => {}
        }
    }
}
