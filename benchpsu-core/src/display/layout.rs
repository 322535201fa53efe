//! Character layout of the 16x2 panel display
//!
//! ```text
//!  col  0123456789012345
//!  row0 00.00V 0000mA CV    set-points, mode glyph in col 15
//!  row1 00.00V 0000mA OE    measurements, enable marker in cols 14-15
//! ```

/// Characters per row
pub const COLS: usize = 16;

/// Number of rows
pub const ROWS: usize = 2;

/// Row holding the set-points (and the edit cursor)
pub const SETPOINT_ROW: u8 = 0;

/// Row holding the measured values
pub const MEASURED_ROW: u8 = 1;

/// Columns of the voltage thousands/hundreds/tens/units digits
pub const VOLTAGE_DIGITS: [u8; 4] = [0, 1, 3, 4];

/// Columns of the current thousands/hundreds/tens/units digits
pub const CURRENT_DIGITS: [u8; 4] = [7, 8, 9, 10];

/// Decimal weight of each digit slot
pub const DIGIT_WEIGHTS: [u16; 4] = [1000, 100, 10, 1];

/// Largest value four digits can show
pub const MAX_DISPLAY_VALUE: u16 = 9999;

/// Column of the CV/CC mode glyph on the set-point row
pub const MODE_GLYPH_COL: usize = 15;

/// First column of the output-enable marker on the measurement row
pub const ENABLE_MARKER_COL: usize = 14;

/// Fixed glyphs; digit and status positions are overwritten on render
pub const TEMPLATE: [[u8; COLS]; ROWS] = [*b"00.00V 0000mA CV", *b"00.00V 0000mA   "];
