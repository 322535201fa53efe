//! Display buffer

use crate::control::output::{MeasuredValues, OutputMode, OutputStatus};
use crate::setpoint::{Cursor, SetPoints};
use crate::traits::{CharacterDisplay, DisplayError};

use super::layout::{
    COLS, CURRENT_DIGITS, DIGIT_WEIGHTS, ENABLE_MARKER_COL, MAX_DISPLAY_VALUE, MEASURED_ROW,
    MODE_GLYPH_COL, ROWS, SETPOINT_ROW, TEMPLATE, VOLTAGE_DIGITS,
};

/// Rendered content of the panel display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBuffer {
    rows: [[u8; COLS]; ROWS],
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self { rows: TEMPLATE }
    }
}

impl DisplayBuffer {
    /// Render a complete buffer
    pub fn render(setpoints: &SetPoints, measured: &MeasuredValues, status: &OutputStatus) -> Self {
        let mut rows = TEMPLATE;

        let set = &mut rows[SETPOINT_ROW as usize];
        put_digits(set, &VOLTAGE_DIGITS, setpoints.voltage.value());
        put_digits(set, &CURRENT_DIGITS, setpoints.current.value());
        set[MODE_GLYPH_COL] = match status.mode {
            OutputMode::ConstantCurrent => b'C',
            OutputMode::ConstantVoltage => b'V',
        };

        let meas = &mut rows[MEASURED_ROW as usize];
        put_digits(meas, &VOLTAGE_DIGITS, measured.voltage);
        put_digits(meas, &CURRENT_DIGITS, measured.current);
        let marker = if status.enabled { b"OE" } else { b"  " };
        meas[ENABLE_MARKER_COL..ENABLE_MARKER_COL + 2].copy_from_slice(marker);

        Self { rows }
    }

    /// Bytes of one row, `None` past the last row
    pub fn row(&self, row: u8) -> Option<&[u8; COLS]> {
        self.rows.get(row as usize)
    }

    /// One row as text; empty past the last row
    pub fn row_str(&self, row: u8) -> &str {
        // Only ASCII is ever written into the buffer
        self.row(row)
            .and_then(|bytes| core::str::from_utf8(bytes).ok())
            .unwrap_or("")
    }

    /// Send the whole buffer, then place the edit cursor
    ///
    /// The cursor goes last so it never shows up mid-write.
    pub fn push<D: CharacterDisplay>(
        &self,
        display: &mut D,
        cursor: Cursor,
    ) -> Result<(), DisplayError> {
        for (row, bytes) in self.rows.iter().enumerate() {
            display.write_at(row as u8, 0, bytes)?;
        }
        display.set_cursor(SETPOINT_ROW, cursor.column())
    }
}

/// Write a value as four ASCII digits; values above 9999 show as 9999
fn put_digits(row: &mut [u8; COLS], columns: &[u8; 4], value: u16) {
    let value = value.min(MAX_DISPLAY_VALUE);
    for (&col, &weight) in columns.iter().zip(DIGIT_WEIGHTS.iter()) {
        row[col as usize] = b'0' + ((value / weight) % 10) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setpoint::SetPoint;
    use proptest::prelude::*;

    fn setpoints(voltage: u16, current: u16) -> SetPoints {
        SetPoints {
            voltage: SetPoint::new(voltage, 0, 9999),
            current: SetPoint::new(current, 0, 9999),
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        calls: heapless::Vec<(u8, u8, heapless::Vec<u8, 16>), 8>,
        cursor: Option<(u8, u8)>,
        cursor_after_writes: bool,
    }

    impl CharacterDisplay for RecordingDisplay {
        fn write_at(&mut self, row: u8, col: u8, bytes: &[u8]) -> Result<(), DisplayError> {
            self.cursor_after_writes = false;
            let data = heapless::Vec::from_slice(bytes).map_err(|_| DisplayError::InvalidCoordinates)?;
            self.calls
                .push((row, col, data))
                .map_err(|_| DisplayError::Communication)
        }

        fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
            self.cursor = Some((row, col));
            self.cursor_after_writes = true;
            Ok(())
        }
    }

    #[test]
    fn test_initial_screen() {
        let buffer = DisplayBuffer::render(
            &setpoints(500, 200),
            &MeasuredValues::default(),
            &OutputStatus::default(),
        );
        assert_eq!(buffer.row_str(0), "05.00V 0200mA CV");
        assert_eq!(buffer.row_str(1), "00.00V 0000mA   ");
    }

    #[test]
    fn test_enabled_constant_current() {
        let status = OutputStatus {
            enabled: true,
            mode: OutputMode::ConstantCurrent,
        };
        let measured = MeasuredValues {
            voltage: 1234,
            current: 987,
        };
        let buffer = DisplayBuffer::render(&setpoints(1500, 3000), &measured, &status);
        assert_eq!(buffer.row_str(0), "15.00V 3000mA CC");
        assert_eq!(buffer.row_str(1), "12.34V 0987mA OE");
    }

    #[test]
    fn test_overrange_measurement_clamped() {
        let measured = MeasuredValues {
            voltage: 20460,
            current: u16::MAX,
        };
        let buffer =
            DisplayBuffer::render(&setpoints(0, 0), &measured, &OutputStatus::default());
        assert_eq!(buffer.row_str(1), "99.99V 9999mA   ");
    }

    #[test]
    fn test_row_out_of_range() {
        let buffer = DisplayBuffer::default();
        assert!(buffer.row(MEASURED_ROW).is_some());
        assert_eq!(buffer.row(ROWS as u8), None);
        assert_eq!(buffer.row(u8::MAX), None);
        assert_eq!(buffer.row_str(ROWS as u8), "");
    }

    #[test]
    fn test_push_sends_rows_then_cursor() {
        let buffer = DisplayBuffer::render(
            &setpoints(500, 200),
            &MeasuredValues::default(),
            &OutputStatus::default(),
        );
        let mut display = RecordingDisplay::default();
        let cursor = Cursor::at_column(8).unwrap();

        buffer.push(&mut display, cursor).unwrap();

        assert_eq!(display.calls.len(), 2);
        assert_eq!(display.calls[0].0, 0);
        assert_eq!(&display.calls[0].2[..], b"05.00V 0200mA CV");
        assert_eq!(display.calls[1].0, 1);
        assert_eq!(display.cursor, Some((SETPOINT_ROW, 8)));
        assert!(display.cursor_after_writes);
    }

    proptest! {
        #[test]
        fn prop_render_is_deterministic(
            v in 0u16..10000,
            i in 0u16..10000,
            mv in any::<u16>(),
            mi in any::<u16>(),
            enabled in any::<bool>(),
            cc in any::<bool>(),
        ) {
            let status = OutputStatus {
                enabled,
                mode: if cc { OutputMode::ConstantCurrent } else { OutputMode::ConstantVoltage },
            };
            let measured = MeasuredValues { voltage: mv, current: mi };
            let a = DisplayBuffer::render(&setpoints(v, i), &measured, &status);
            let b = DisplayBuffer::render(&setpoints(v, i), &measured, &status);
            prop_assert_eq!(a, b);

            // Digits read back as the set-point
            let row = a.row(SETPOINT_ROW).unwrap();
            let shown = VOLTAGE_DIGITS
                .iter()
                .fold(0u16, |acc, &c| acc * 10 + (row[c as usize] - b'0') as u16);
            prop_assert_eq!(shown, v);
        }
    }
}
