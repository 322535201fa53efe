//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::display::layout::MAX_DISPLAY_VALUE;
use crate::setpoint::Channel;

/// Largest supported debounce window (samples)
pub const MAX_DEBOUNCE_WINDOW: u8 = 64;

/// Range and power-on value of one set-point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetPointRange {
    /// Lowest allowed value
    pub min: u16,
    /// Highest allowed value
    pub max: u16,
    /// Value at power-on
    pub initial: u16,
}

/// Where the dispatcher goes after moving the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CursorFollowUp {
    /// Back to idle; the cursor is placed on the display directly
    #[default]
    Idle,
    /// Redraw the whole display
    Refresh,
}

/// What the mode button does besides flipping CV/CC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModeSwitch {
    /// Continue through the output-enable toggle
    #[default]
    ToggleOutput,
    /// Keep the enable state, re-derive the actuator targets
    Retarget,
}

/// Dispatcher behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchPolicy {
    /// Successor of a cursor move
    pub cursor_follow_up: CursorFollowUp,
    /// Mode button variant
    pub mode_switch: ModeSwitch,
    /// Voltage target used when enabling in constant-current mode (cV)
    pub safe_voltage_ceiling: u16,
    /// Sample ticks between periodic display refreshes
    pub refresh_interval_ticks: u16,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            cursor_follow_up: CursorFollowUp::Idle,
            mode_switch: ModeSwitch::ToggleOutput,
            safe_voltage_ceiling: 2000,
            refresh_interval_ticks: 488,
        }
    }
}

/// Button sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplingConfig {
    /// Sampler tick period in microseconds
    pub period_us: u32,
    /// Consecutive samples a button must be active in
    pub debounce_window: u8,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            period_us: 2048,
            debounce_window: 35,
        }
    }
}

/// Integer scale factor `num / den`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ratio {
    pub num: u16,
    pub den: u16,
}

impl Ratio {
    /// Scale `raw`, saturating at `u16::MAX`
    ///
    /// A zero denominator is rejected by validation; here it saturates.
    pub fn apply(&self, raw: u16) -> u16 {
        let scaled = (raw as u32 * self.num as u32)
            .checked_div(self.den as u32)
            .unwrap_or(u32::MAX);
        scaled.min(u16::MAX as u32) as u16
    }
}

/// ADC raw count to display units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeasurementScale {
    /// Raw count to centivolts
    pub voltage: Ratio,
    /// Raw count to milliamps
    pub current: Ratio,
}

impl Default for MeasurementScale {
    fn default() -> Self {
        // 10-bit ADC against the 2.56 V reference through the board dividers
        Self {
            voltage: Ratio { num: 2, den: 1 },
            current: Ratio { num: 3, den: 1 },
        }
    }
}

/// Actuator target that maps to 100 % PWM duty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActuatorScale {
    /// Centivolts at full duty
    pub voltage_full_scale: u16,
    /// Milliamps at full duty
    pub current_full_scale: u16,
}

impl Default for ActuatorScale {
    fn default() -> Self {
        Self {
            voltage_full_scale: 2000,
            current_full_scale: 3750,
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Voltage set-point in centivolts
    pub voltage: SetPointRange,
    /// Current set-point in milliamps
    pub current: SetPointRange,
    pub dispatch: DispatchPolicy,
    pub sampling: SamplingConfig,
    pub measurement: MeasurementScale,
    pub actuator: ActuatorScale,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            voltage: SetPointRange {
                min: 0,
                max: 2000,
                initial: 500,
            },
            current: SetPointRange {
                min: 0,
                max: 3000,
                initial: 200,
            },
            dispatch: DispatchPolicy::default(),
            sampling: SamplingConfig::default(),
            measurement: MeasurementScale::default(),
            actuator: ActuatorScale::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// min > max, or initial outside [min, max]
    InvalidRange(Channel),
    /// Maximum does not fit in four display digits
    ExceedsDisplay(Channel),
    /// Refresh interval of zero ticks
    ZeroRefreshInterval,
    /// Sample period of zero
    ZeroSamplePeriod,
    /// Debounce window outside 1..=MAX_DEBOUNCE_WINDOW
    InvalidDebounceWindow,
    /// Measurement ratio with a zero denominator
    ZeroScaleDenominator,
    /// Actuator full-scale value of zero
    ZeroFullScale,
    /// Safe ceiling below the voltage minimum
    CeilingBelowMinimum,
}

impl PanelConfig {
    /// Range for a channel
    pub fn range(&self, channel: Channel) -> &SetPointRange {
        match channel {
            Channel::Voltage => &self.voltage,
            Channel::Current => &self.current,
        }
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        for channel in [Channel::Voltage, Channel::Current] {
            let range = self.range(channel);
            if range.min > range.max || range.initial < range.min || range.initial > range.max {
                return Err(ConfigError::InvalidRange(channel));
            }
            if range.max > MAX_DISPLAY_VALUE {
                return Err(ConfigError::ExceedsDisplay(channel));
            }
        }

        if self.dispatch.refresh_interval_ticks == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        if self.dispatch.safe_voltage_ceiling < self.voltage.min {
            return Err(ConfigError::CeilingBelowMinimum);
        }

        if self.sampling.period_us == 0 {
            return Err(ConfigError::ZeroSamplePeriod);
        }
        if self.sampling.debounce_window == 0
            || self.sampling.debounce_window > MAX_DEBOUNCE_WINDOW
        {
            return Err(ConfigError::InvalidDebounceWindow);
        }

        if self.measurement.voltage.den == 0 || self.measurement.current.den == 0 {
            return Err(ConfigError::ZeroScaleDenominator);
        }
        if self.actuator.voltage_full_scale == 0 || self.actuator.current_full_scale == 0 {
            return Err(ConfigError::ZeroFullScale);
        }

        Ok(())
    }
}
