//! Build script for benchpsu-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time and compiles it into the binary

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use benchpsu_core::config::{ConfigError, PanelConfig, Ratio, SetPointRange};

fn main() {
    setup_linker();
    let config = load_config();
    emit_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse and validate panel.toml
fn load_config() -> PanelConfig {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: panel.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a panel.toml configuration file.          ║\n\
            ║  Please create one in the benchpsu-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read panel.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: PanelConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid panel.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid panel configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&describe(e))
        );
    }

    println!("cargo:warning=panel.toml validated successfully");
    config
}

/// Human readable validation error
fn describe(e: ConfigError) -> String {
    match e {
        ConfigError::InvalidRange(channel) => format!(
            "• [{:?}] needs min <= initial <= max",
            channel
        )
        .to_lowercase(),
        ConfigError::ExceedsDisplay(channel) => format!(
            "• [{:?}] max must fit in four digits (<= 9999)",
            channel
        )
        .to_lowercase(),
        ConfigError::ZeroRefreshInterval => {
            "• [dispatch] refresh_interval_ticks must be > 0".to_string()
        }
        ConfigError::CeilingBelowMinimum => {
            "• [dispatch] safe_voltage_ceiling is below [voltage] min".to_string()
        }
        ConfigError::ZeroSamplePeriod => "• [sampling] period_us must be > 0".to_string(),
        ConfigError::InvalidDebounceWindow => format!(
            "• [sampling] debounce_window must be 1-{}",
            benchpsu_core::config::MAX_DEBOUNCE_WINDOW
        ),
        ConfigError::ZeroScaleDenominator => {
            "• [measurement] ratio denominators must be > 0".to_string()
        }
        ConfigError::ZeroFullScale => "• [actuator] full scale values must be > 0".to_string(),
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the validated configuration as Rust constants
fn emit_config(config: &PanelConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let code = format!(
        "// Generated from panel.toml by build.rs\n\
        \n\
        /// Panel configuration compiled from panel.toml\n\
        pub const PANEL_CONFIG: benchpsu_core::config::PanelConfig = benchpsu_core::config::PanelConfig {{\n\
        \x20   voltage: {voltage},\n\
        \x20   current: {current},\n\
        \x20   dispatch: benchpsu_core::config::DispatchPolicy {{\n\
        \x20       cursor_follow_up: benchpsu_core::config::CursorFollowUp::{follow_up:?},\n\
        \x20       mode_switch: benchpsu_core::config::ModeSwitch::{mode_switch:?},\n\
        \x20       safe_voltage_ceiling: {ceiling},\n\
        \x20       refresh_interval_ticks: {refresh},\n\
        \x20   }},\n\
        \x20   sampling: benchpsu_core::config::SamplingConfig {{\n\
        \x20       period_us: {period},\n\
        \x20       debounce_window: {window},\n\
        \x20   }},\n\
        \x20   measurement: benchpsu_core::config::MeasurementScale {{\n\
        \x20       voltage: {meas_v},\n\
        \x20       current: {meas_i},\n\
        \x20   }},\n\
        \x20   actuator: benchpsu_core::config::ActuatorScale {{\n\
        \x20       voltage_full_scale: {fs_v},\n\
        \x20       current_full_scale: {fs_i},\n\
        \x20   }},\n\
        }};\n\
        \n\
        /// Debounce window as a const generic\n\
        pub const DEBOUNCE_WINDOW: usize = {window};\n",
        voltage = range_literal(&config.voltage),
        current = range_literal(&config.current),
        follow_up = config.dispatch.cursor_follow_up,
        mode_switch = config.dispatch.mode_switch,
        ceiling = config.dispatch.safe_voltage_ceiling,
        refresh = config.dispatch.refresh_interval_ticks,
        period = config.sampling.period_us,
        window = config.sampling.debounce_window,
        meas_v = ratio_literal(&config.measurement.voltage),
        meas_i = ratio_literal(&config.measurement.current),
        fs_v = config.actuator.voltage_full_scale,
        fs_i = config.actuator.current_full_scale,
    );

    fs::write(out_dir.join("panel_config.rs"), code).unwrap();
}

fn range_literal(range: &SetPointRange) -> String {
    format!(
        "benchpsu_core::config::SetPointRange {{ min: {}, max: {}, initial: {} }}",
        range.min, range.max, range.initial
    )
}

fn ratio_literal(ratio: &Ratio) -> String {
    format!(
        "benchpsu_core::config::Ratio {{ num: {}, den: {} }}",
        ratio.num, ratio.den
    )
}
