//! Collaborator traits
//!
//! These traits define the interface between the panel logic and the
//! measurement, actuator and character display drivers.

pub mod actuator;
pub mod display;
pub mod measure;

pub use actuator::{ActuatorError, OutputActuator};
pub use display::{CharacterDisplay, DisplayError};
pub use measure::{MeasureError, MeasurementSource};
