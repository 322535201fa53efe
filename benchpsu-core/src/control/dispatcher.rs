//! Effect runner
//!
//! Couples a [`PanelMachine`] to the shared inputs and the three
//! collaborator drivers.

use crate::config::PanelConfig;
use crate::display::layout::SETPOINT_ROW;
use crate::input::SharedInputs;
use crate::traits::{
    ActuatorError, CharacterDisplay, DisplayError, MeasureError, MeasurementSource, OutputActuator,
};

use super::machine::{Effect, PanelMachine};
use super::output::MeasuredValues;
use super::state::State;

/// Driver failure during one dispatcher step
///
/// Never fatal: the machine has already advanced when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    Measure(MeasureError),
    Actuator(ActuatorError),
    Display(DisplayError),
}

impl From<MeasureError> for PanelError {
    fn from(e: MeasureError) -> Self {
        PanelError::Measure(e)
    }
}

impl From<ActuatorError> for PanelError {
    fn from(e: ActuatorError) -> Self {
        PanelError::Actuator(e)
    }
}

impl From<DisplayError> for PanelError {
    fn from(e: DisplayError) -> Self {
        PanelError::Display(e)
    }
}

/// Control dispatcher
///
/// Owns the drivers and borrows the input block the background tasks
/// write into.
pub struct Dispatcher<'a, M, A, D, const N: usize> {
    machine: PanelMachine,
    inputs: &'a SharedInputs<N>,
    meter: M,
    actuator: A,
    display: D,
}

impl<'a, M, A, D, const N: usize> Dispatcher<'a, M, A, D, N>
where
    M: MeasurementSource,
    A: OutputActuator,
    D: CharacterDisplay,
{
    /// Create a dispatcher in the power-on state
    pub fn new(
        config: &PanelConfig,
        inputs: &'a SharedInputs<N>,
        meter: M,
        actuator: A,
        display: D,
    ) -> Self {
        Self {
            machine: PanelMachine::new(config),
            inputs,
            meter,
            actuator,
            display,
        }
    }

    /// State the next step will run
    pub fn state(&self) -> State {
        self.machine.state()
    }

    /// The underlying machine
    pub fn machine(&self) -> &PanelMachine {
        &self.machine
    }

    /// Run one state action and its effect
    ///
    /// Returns the state that ran. On a driver error the machine still
    /// moves on; a failed measurement keeps the previous values and the
    /// display is refreshed anyway.
    pub fn step(&mut self) -> Result<State, PanelError> {
        let ran = self.machine.state();
        let inputs = self.inputs;
        let interval = self.machine.policy().refresh_interval_ticks;

        match self.machine.step(|| inputs.poll(interval)) {
            Effect::None => {}
            Effect::ConsumeTurn(turn) => {
                self.inputs.consume_turn(turn);
            }
            Effect::PlaceCursor(cursor) => {
                self.display.set_cursor(SETPOINT_ROW, cursor.column())?;
            }
            Effect::DriveOutputs(targets) => {
                let voltage = self.actuator.set_voltage_target(targets.voltage);
                let current = self.actuator.set_current_target(targets.current);
                voltage?;
                current?;
            }
            Effect::Refresh => self.refresh()?,
        }

        Ok(ran)
    }

    fn refresh(&mut self) -> Result<(), PanelError> {
        self.inputs.restart_refresh_timer();

        let measured = self.measure();
        if let Ok(values) = measured {
            self.machine.record_measurement(values);
        }

        let buffer = self.machine.model().render();
        let cursor = self.machine.model().cursor;
        let display = &mut self.display;
        self.inputs.masked(|| buffer.push(display, cursor))?;

        measured.map(|_| ()).map_err(PanelError::from)
    }

    fn measure(&mut self) -> Result<MeasuredValues, MeasureError> {
        Ok(MeasuredValues {
            voltage: self.meter.read_voltage()?,
            current: self.meter.read_current()?,
        })
    }

    /// Release the drivers
    #[cfg(test)]
    pub(crate) fn release(self) -> (M, A, D) {
        (self.meter, self.actuator, self.display)
    }
}
