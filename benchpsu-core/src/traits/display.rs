//! Character display driver trait

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or pin error while writing
    Communication,
    /// Position outside the character grid
    InvalidCoordinates,
}

/// Trait for character grid displays
///
/// Writes are synchronous and applied in call order; the panel relies on
/// the cursor placement landing after the content it follows.
pub trait CharacterDisplay {
    /// Write ASCII bytes starting at a position
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number (0-based)
    fn write_at(&mut self, row: u8, col: u8, bytes: &[u8]) -> Result<(), DisplayError>;

    /// Place the visible edit cursor
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;
}
