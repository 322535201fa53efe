//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in benchpsu-core on top of `embedded-hal` 1.0:
//!
//! - HD44780 character LCD in 4-bit mode
//! - Regulator reference outputs on two PWM channels
//! - Output measurement through scaled ADC readings

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod actuator;
pub mod lcd;
pub mod measure;
