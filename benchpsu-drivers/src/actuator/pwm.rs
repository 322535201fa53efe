//! PWM regulator references
//!
//! The regulator takes its voltage and current references from two
//! filtered PWM outputs. Duty scales linearly with the target, reaching
//! 100 % at the configured full-scale value.

use benchpsu_core::config::ActuatorScale;
use benchpsu_core::traits::{ActuatorError, OutputActuator};
use embedded_hal::pwm::SetDutyCycle;

/// Regulator references on two PWM channels
pub struct PwmActuator<V, I> {
    voltage: V,
    current: I,
    scale: ActuatorScale,
}

impl<V, I> PwmActuator<V, I>
where
    V: SetDutyCycle,
    I: SetDutyCycle,
{
    /// Create the actuator
    ///
    /// The channels are left as configured; call [`PwmActuator::off`] to
    /// force both references to zero.
    pub fn new(voltage: V, current: I, scale: ActuatorScale) -> Self {
        Self {
            voltage,
            current,
            scale,
        }
    }

    /// Drive both references to zero
    ///
    /// Both channels are written even if the first one fails; the first
    /// error is returned.
    pub fn off(&mut self) -> Result<(), ActuatorError> {
        let voltage = self.set_voltage_target(0);
        let current = self.set_current_target(0);
        voltage.and(current)
    }

    #[cfg(test)]
    fn release(self) -> (V, I) {
        (self.voltage, self.current)
    }
}

/// Duty for `target` out of `full_scale`, saturating at `max_duty`
///
/// A zero full scale is rejected by config validation; it yields zero
/// duty here.
fn scale_duty(target: u16, full_scale: u16, max_duty: u16) -> u16 {
    let duty = (target as u32 * max_duty as u32)
        .checked_div(full_scale as u32)
        .unwrap_or(0);
    duty.min(max_duty as u32) as u16
}

impl<V, I> OutputActuator for PwmActuator<V, I>
where
    V: SetDutyCycle,
    I: SetDutyCycle,
{
    fn set_voltage_target(&mut self, centivolts: u16) -> Result<(), ActuatorError> {
        let duty = scale_duty(
            centivolts,
            self.scale.voltage_full_scale,
            self.voltage.max_duty_cycle(),
        );
        self.voltage
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::Pwm)
    }

    fn set_current_target(&mut self, milliamps: u16) -> Result<(), ActuatorError> {
        let duty = scale_duty(
            milliamps,
            self.scale.current_full_scale,
            self.current.max_duty_cycle(),
        );
        self.current
            .set_duty_cycle(duty)
            .map_err(|_| ActuatorError::Pwm)
    }
}
