//! Board-agnostic front panel logic for the bench power supply
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Input handling (switch debouncing, quadrature pattern decoding)
//! - The shared input block written by background tasks
//! - Set-point model with the editable digit column table
//! - Panel state machine and the dispatcher that runs its effects
//! - Two-line display formatting
//! - Collaborator traits (measurement, actuator, character display)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod control;
pub mod display;
pub mod input;
pub mod setpoint;
pub mod traits;
