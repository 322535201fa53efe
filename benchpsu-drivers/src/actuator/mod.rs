//! Regulator reference outputs

pub mod pwm;

pub use pwm::PwmActuator;
