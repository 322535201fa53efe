//! Front panel input handling
//!
//! Raw samples and encoder transitions are produced by background tasks
//! into [`SharedInputs`]; the dispatcher polls them once per idle pass.

pub mod buttons;
pub mod debounce;
pub mod encoder;
pub mod shared;

pub use buttons::Buttons;
pub use debounce::{Debouncer, Settled};
pub use encoder::{EncoderDecoder, Symbol, Turn};
pub use shared::{Inputs, SharedInputs};

/// Horizontal direction for cursor moves and encoder turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Left,
    Right,
}
