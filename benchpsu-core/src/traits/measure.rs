//! Output measurement

/// Errors that can occur while measuring the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasureError {
    /// ADC conversion did not complete
    ConversionError,
}

/// Trait for reading the supply output
///
/// Values are in display units: centivolts and milliamps.
pub trait MeasurementSource {
    /// Read the output voltage in centivolts
    fn read_voltage(&mut self) -> Result<u16, MeasureError>;

    /// Read the output current in milliamps
    fn read_current(&mut self) -> Result<u16, MeasureError>;
}
