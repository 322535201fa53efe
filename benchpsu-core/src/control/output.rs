//! Output status and the values exchanged with the drivers

/// Regulation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputMode {
    /// Constant voltage with current limiting
    #[default]
    ConstantVoltage,
    /// Constant current
    ConstantCurrent,
}

impl OutputMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            OutputMode::ConstantVoltage => OutputMode::ConstantCurrent,
            OutputMode::ConstantCurrent => OutputMode::ConstantVoltage,
        }
    }
}

/// Output enable flag and regulation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputStatus {
    pub enabled: bool,
    pub mode: OutputMode,
}

/// Values last handed to the actuator driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorTargets {
    /// Centivolts
    pub voltage: u16,
    /// Milliamps
    pub current: u16,
}

impl ActuatorTargets {
    /// Both references at zero
    pub const OFF: Self = Self {
        voltage: 0,
        current: 0,
    };
}

/// Last measured output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasuredValues {
    /// Centivolts
    pub voltage: u16,
    /// Milliamps
    pub current: u16,
}
