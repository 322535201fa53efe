//! Output measurement

pub mod adc;

pub use adc::{AdcReader, ScaledMeter};
