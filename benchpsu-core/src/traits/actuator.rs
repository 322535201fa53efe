//! Output actuator

/// Errors that can occur while driving the regulator references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// PWM peripheral rejected the duty cycle
    Pwm,
}

/// Trait for the regulator reference outputs
///
/// Implementations translate targets into whatever the hardware needs
/// (PWM duty, DAC code). A target of zero must turn the output off.
pub trait OutputActuator {
    /// Set the voltage target in centivolts
    fn set_voltage_target(&mut self, centivolts: u16) -> Result<(), ActuatorError>;

    /// Set the current limit target in milliamps
    fn set_current_target(&mut self, milliamps: u16) -> Result<(), ActuatorError>;
}
