//! Panel states
//!
//! Every state except `Idle` performs exactly one action and moves on.
//! `Idle` picks the next action from the polled inputs.

use crate::input::{Buttons, Inputs, Turn};

/// Dispatcher states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for input or the refresh interval
    Idle,
    /// Move the edit cursor one editable column right
    CursorRight,
    /// Move the edit cursor one editable column left
    CursorLeft,
    /// Add the cursor column's step to its set-point
    EncoderIncrement,
    /// Remove the cursor column's step from its set-point
    EncoderDecrement,
    /// Flip output enable and derive the actuator targets
    ToggleOutputEnable,
    /// Flip between constant voltage and constant current
    ToggleMode,
    /// Push the actuator targets to the driver
    ActuatorUpdate,
    /// Measure, render and push the display
    DisplayRefresh,
}

impl State {
    /// Power-on state: render once before the first idle pass
    pub const INITIAL: Self = State::DisplayRefresh;

    /// Choose the next state from idle
    ///
    /// Priority order, first match wins: output enable, mode, cursor left,
    /// cursor right, encoder right, encoder left, refresh interval.
    pub fn select(inputs: &Inputs) -> Self {
        let pressed = inputs.pressed();

        if pressed.contains(Buttons::OUTPUT_ENABLE) {
            State::ToggleOutputEnable
        } else if pressed.contains(Buttons::MODE) {
            State::ToggleMode
        } else if pressed.contains(Buttons::CURSOR_LEFT) {
            State::CursorLeft
        } else if pressed.contains(Buttons::CURSOR_RIGHT) {
            State::CursorRight
        } else if inputs.turn == Turn::Right {
            State::EncoderIncrement
        } else if inputs.turn == Turn::Left {
            State::EncoderDecrement
        } else if inputs.refresh_due {
            State::DisplayRefresh
        } else {
            State::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Settled;

    fn pressing(buttons: Buttons) -> Inputs {
        Inputs {
            buttons: Settled {
                held: buttons,
                edges: buttons,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(State::INITIAL, State::DisplayRefresh);
    }

    #[test]
    fn test_nothing_stays_idle() {
        assert_eq!(State::select(&Inputs::default()), State::Idle);
    }

    #[test]
    fn test_single_inputs() {
        assert_eq!(
            State::select(&pressing(Buttons::OUTPUT_ENABLE)),
            State::ToggleOutputEnable
        );
        assert_eq!(State::select(&pressing(Buttons::MODE)), State::ToggleMode);
        assert_eq!(State::select(&pressing(Buttons::CURSOR_LEFT)), State::CursorLeft);
        assert_eq!(State::select(&pressing(Buttons::CURSOR_RIGHT)), State::CursorRight);

        let right = Inputs {
            turn: Turn::Right,
            ..Default::default()
        };
        assert_eq!(State::select(&right), State::EncoderIncrement);

        let left = Inputs {
            turn: Turn::Left,
            ..Default::default()
        };
        assert_eq!(State::select(&left), State::EncoderDecrement);

        let refresh = Inputs {
            refresh_due: true,
            ..Default::default()
        };
        assert_eq!(State::select(&refresh), State::DisplayRefresh);
    }

    #[test]
    fn test_priority_order() {
        let mut inputs = pressing(Buttons::ALL);
        inputs.turn = Turn::Right;
        inputs.refresh_due = true;
        assert_eq!(State::select(&inputs), State::ToggleOutputEnable);

        let mut inputs = pressing(Buttons::MODE | Buttons::CURSOR_LEFT);
        inputs.turn = Turn::Left;
        assert_eq!(State::select(&inputs), State::ToggleMode);

        let mut inputs = pressing(Buttons::CURSOR_LEFT | Buttons::CURSOR_RIGHT);
        inputs.refresh_due = true;
        assert_eq!(State::select(&inputs), State::CursorLeft);

        let inputs = Inputs {
            turn: Turn::Left,
            refresh_due: true,
            ..Default::default()
        };
        assert_eq!(State::select(&inputs), State::EncoderDecrement);
    }

    #[test]
    fn test_held_without_edge_is_ignored() {
        let inputs = Inputs {
            buttons: Settled {
                held: Buttons::OUTPUT_ENABLE,
                edges: Buttons::NONE,
            },
            ..Default::default()
        };
        assert_eq!(State::select(&inputs), State::Idle);
    }

    #[test]
    fn test_release_is_ignored() {
        let inputs = Inputs {
            buttons: Settled {
                held: Buttons::NONE,
                edges: Buttons::MODE,
            },
            ..Default::default()
        };
        assert_eq!(State::select(&inputs), State::Idle);
    }
}
