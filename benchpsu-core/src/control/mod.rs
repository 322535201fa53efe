//! Panel control
//!
//! The panel is an explicit, finite state machine. [`PanelMachine`] holds
//! the decision logic and the panel model and never touches hardware; each
//! step yields one [`Effect`]. The [`Dispatcher`] polls the shared inputs,
//! steps the machine and carries out the effect on the drivers.

pub mod dispatcher;
pub mod machine;
pub mod output;
pub mod state;

pub use dispatcher::{Dispatcher, PanelError};
pub use machine::{Effect, PanelMachine, PanelModel};
pub use output::{ActuatorTargets, MeasuredValues, OutputMode, OutputStatus};
pub use state::State;
