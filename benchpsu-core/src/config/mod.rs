//! Configuration types
//!
//! Board-agnostic panel configuration. The firmware bakes a validated
//! `PanelConfig` in at build time; nothing is persisted at runtime.

pub mod types;

pub use types::*;
