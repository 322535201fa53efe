//! Panel state machine
//!
//! Pure decision logic: one call to [`PanelMachine::step`] runs the action
//! of the current state against the [`PanelModel`], moves to the successor
//! and reports the hardware work as an [`Effect`]. Nothing here talks to a
//! driver.

use crate::config::{CursorFollowUp, DispatchPolicy, ModeSwitch, PanelConfig};
use crate::display::DisplayBuffer;
use crate::input::{Direction, Inputs, Turn};
use crate::setpoint::{Cursor, SetPoints};

use super::output::{ActuatorTargets, MeasuredValues, OutputMode, OutputStatus};
use super::state::State;

/// Hardware work requested by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Nothing to do
    None,
    /// Mark the encoder detent as handled
    ConsumeTurn(Turn),
    /// Move the visible edit cursor
    PlaceCursor(Cursor),
    /// Hand these targets to the actuator driver
    DriveOutputs(ActuatorTargets),
    /// Measure, render, push the display and restart the refresh interval
    Refresh,
}

/// Everything the panel knows about the supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelModel {
    pub setpoints: SetPoints,
    pub cursor: Cursor,
    pub status: OutputStatus,
    /// Actuator-facing copy of the set-points
    pub targets: ActuatorTargets,
    pub measured: MeasuredValues,
}

impl PanelModel {
    /// Power-on model: configured initial values, cursor on the first
    /// column, output disabled in constant-voltage mode
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            setpoints: SetPoints::from_ranges(&config.voltage, &config.current),
            cursor: Cursor::FIRST,
            status: OutputStatus::default(),
            targets: ActuatorTargets::OFF,
            measured: MeasuredValues::default(),
        }
    }

    /// Render the model into a display buffer
    pub fn render(&self) -> DisplayBuffer {
        DisplayBuffer::render(&self.setpoints, &self.measured, &self.status)
    }
}

/// Control dispatcher state machine
#[derive(Debug, Clone)]
pub struct PanelMachine {
    state: State,
    model: PanelModel,
    policy: DispatchPolicy,
}

impl PanelMachine {
    /// Create a machine in the power-on state
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            state: State::INITIAL,
            model: PanelModel::new(config),
            policy: config.dispatch,
        }
    }

    /// State the next step will run
    pub fn state(&self) -> State {
        self.state
    }

    /// Current panel model
    pub fn model(&self) -> &PanelModel {
        &self.model
    }

    /// Dispatch policy in use
    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Store a fresh measurement
    pub fn record_measurement(&mut self, measured: MeasuredValues) {
        self.model.measured = measured;
    }

    /// Run the current state and advance
    ///
    /// `poll` is only called in `Idle`; the other states never look at the
    /// inputs, so a turn or press arriving meanwhile waits for the next
    /// idle pass.
    pub fn step(&mut self, poll: impl FnOnce() -> Inputs) -> Effect {
        let (next, effect) = match self.state {
            State::Idle => (State::select(&poll()), Effect::None),
            State::CursorLeft => self.move_cursor(Direction::Left),
            State::CursorRight => self.move_cursor(Direction::Right),
            State::EncoderIncrement => self.apply_turn(Turn::Right),
            State::EncoderDecrement => self.apply_turn(Turn::Left),
            State::ToggleOutputEnable => {
                self.model.status.enabled = !self.model.status.enabled;
                self.derive_targets();
                (State::ActuatorUpdate, Effect::None)
            }
            State::ToggleMode => {
                self.model.status.mode = self.model.status.mode.toggled();
                match self.policy.mode_switch {
                    ModeSwitch::ToggleOutput => (State::ToggleOutputEnable, Effect::None),
                    ModeSwitch::Retarget => {
                        self.derive_targets();
                        (State::ActuatorUpdate, Effect::None)
                    }
                }
            }
            State::ActuatorUpdate => (
                State::DisplayRefresh,
                Effect::DriveOutputs(self.model.targets),
            ),
            State::DisplayRefresh => (State::Idle, Effect::Refresh),
        };

        self.state = next;
        effect
    }

    fn move_cursor(&mut self, direction: Direction) -> (State, Effect) {
        self.model.cursor.move_cursor(direction);
        let next = match self.policy.cursor_follow_up {
            CursorFollowUp::Idle => State::Idle,
            CursorFollowUp::Refresh => State::DisplayRefresh,
        };
        (next, Effect::PlaceCursor(self.model.cursor))
    }

    /// Idle never clears the detent itself, so a turn that loses to a
    /// button press is still pending on the next idle pass.
    fn apply_turn(&mut self, turn: Turn) -> (State, Effect) {
        let model = &mut self.model;
        model.setpoints.apply_turn(model.cursor, turn);

        let next = if model.status.enabled {
            model.targets = ActuatorTargets {
                voltage: model.setpoints.voltage.value(),
                current: model.setpoints.current.value(),
            };
            State::ActuatorUpdate
        } else {
            State::Idle
        };
        (next, Effect::ConsumeTurn(turn))
    }

    /// Targets for the current enable and mode
    ///
    /// Enabling in constant-current mode drives the voltage reference to
    /// the safe ceiling so a low voltage set-point cannot cut into the
    /// current regulation.
    fn derive_targets(&mut self) {
        let model = &mut self.model;
        model.targets = if model.status.enabled {
            let voltage = match model.status.mode {
                OutputMode::ConstantCurrent => self.policy.safe_voltage_ceiling,
                OutputMode::ConstantVoltage => model.setpoints.voltage.value(),
            };
            ActuatorTargets {
                voltage,
                current: model.setpoints.current.value(),
            }
        } else {
            ActuatorTargets::OFF
        };
    }
}
