//! RP2040 ADC adapter for the measurement driver

use benchpsu_core::setpoint::Channel;
use benchpsu_core::traits::MeasureError;
use benchpsu_drivers::measure::AdcReader;
use embassy_rp::adc::{self, Adc, Blocking};

/// On-chip ADC with the voltage divider and shunt amplifier inputs
pub struct BoardAdc {
    adc: Adc<'static, Blocking>,
    voltage: adc::Channel<'static>,
    current: adc::Channel<'static>,
}

impl BoardAdc {
    pub fn new(
        adc: Adc<'static, Blocking>,
        voltage: adc::Channel<'static>,
        current: adc::Channel<'static>,
    ) -> Self {
        Self {
            adc,
            voltage,
            current,
        }
    }
}

impl AdcReader for BoardAdc {
    fn read(&mut self, channel: Channel) -> Result<u16, MeasureError> {
        let input = match channel {
            Channel::Voltage => &mut self.voltage,
            Channel::Current => &mut self.current,
        };
        self.adc
            .blocking_read(input)
            .map_err(|_| MeasureError::ConversionError)
    }
}
