//! ADC output measurement
//!
//! Output voltage and current are sensed through resistor dividers and a
//! shunt amplifier; each raw count is scaled into display units with an
//! integer ratio.

use benchpsu_core::config::MeasurementScale;
use benchpsu_core::setpoint::Channel;
use benchpsu_core::traits::{MeasureError, MeasurementSource};

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read one raw conversion of the channel sensing `channel`
    fn read(&mut self, channel: Channel) -> Result<u16, MeasureError>;
}

/// Measurement source built from raw ADC readings
pub struct ScaledMeter<A> {
    adc: A,
    scale: MeasurementScale,
}

impl<A: AdcReader> ScaledMeter<A> {
    /// Create a meter
    ///
    /// # Arguments
    /// - `adc`: converter with the voltage divider and shunt amplifier inputs
    /// - `scale`: raw count to centivolt / milliamp ratios
    pub fn new(adc: A, scale: MeasurementScale) -> Self {
        Self { adc, scale }
    }
}

impl<A: AdcReader> MeasurementSource for ScaledMeter<A> {
    fn read_voltage(&mut self) -> Result<u16, MeasureError> {
        let raw = self.adc.read(Channel::Voltage)?;
        Ok(self.scale.voltage.apply(raw))
    }

    fn read_current(&mut self) -> Result<u16, MeasureError> {
        let raw = self.adc.read(Channel::Current)?;
        Ok(self.scale.current.apply(raw))
    }
}
