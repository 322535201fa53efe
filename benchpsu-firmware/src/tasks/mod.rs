//! Embassy async tasks
//!
//! The sampler and encoder tasks run on the high-priority interrupt
//! executor and only write into the shared input block; the panel task
//! runs on the thread executor and does everything else.

pub mod encoder;
pub mod panel;
pub mod sampler;

pub use encoder::encoder_task;
pub use panel::{panel_task, PanelDrivers};
pub use sampler::{sampler_task, ButtonPins};
