//! Panel display formatting
//!
//! Renders the set-points, measurements and output status into a fixed
//! 16x2 character buffer. Rendering is a pure function of its inputs and
//! always recomputes the whole buffer.

pub mod buffer;
pub mod layout;

pub use buffer::DisplayBuffer;
