//! Panel configuration
//!
//! Generated by build.rs from the validated panel.toml, so the firmware
//! never parses or checks configuration at runtime.

include!(concat!(env!("OUT_DIR"), "/panel_config.rs"));
