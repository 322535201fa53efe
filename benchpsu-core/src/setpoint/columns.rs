//! Editable digit columns
//!
//! Maps every editable display column to the set-point it edits and the
//! step an encoder detent applies there. Columns not listed (decimal
//! point, unit letters, spacing) can never hold the cursor.

use crate::display::layout::{CURRENT_DIGITS, DIGIT_WEIGHTS, VOLTAGE_DIGITS};

/// Which set-point a column belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Output voltage in centivolts
    Voltage,
    /// Current limit in milliamps
    Current,
}

/// One editable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EditableColumn {
    /// Display column on the set-point row
    pub column: u8,
    /// Set-point edited from this column
    pub channel: Channel,
    /// Amount one detent adds or removes
    pub step: u16,
}

const fn digit(column: u8, channel: Channel, step: u16) -> EditableColumn {
    EditableColumn {
        column,
        channel,
        step,
    }
}

/// Editable columns in left-to-right display order
pub const EDITABLE_COLUMNS: [EditableColumn; 8] = [
    digit(VOLTAGE_DIGITS[0], Channel::Voltage, DIGIT_WEIGHTS[0]),
    digit(VOLTAGE_DIGITS[1], Channel::Voltage, DIGIT_WEIGHTS[1]),
    digit(VOLTAGE_DIGITS[2], Channel::Voltage, DIGIT_WEIGHTS[2]),
    digit(VOLTAGE_DIGITS[3], Channel::Voltage, DIGIT_WEIGHTS[3]),
    digit(CURRENT_DIGITS[0], Channel::Current, DIGIT_WEIGHTS[0]),
    digit(CURRENT_DIGITS[1], Channel::Current, DIGIT_WEIGHTS[1]),
    digit(CURRENT_DIGITS[2], Channel::Current, DIGIT_WEIGHTS[2]),
    digit(CURRENT_DIGITS[3], Channel::Current, DIGIT_WEIGHTS[3]),
];
