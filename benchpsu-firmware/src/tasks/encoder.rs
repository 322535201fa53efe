//! Encoder edge task
//!
//! Waits for an edge on either quadrature phase and records the phase
//! levels seen right after it. Both phases are pulled up and the encoder
//! contacts pull them low, so the levels are inverted before recording.
//! Decoding happens in the panel loop.

use benchpsu_core::input::{SharedInputs, Symbol};
use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use crate::config::DEBOUNCE_WINDOW;

/// Encoder task - one symbol per phase edge
#[embassy_executor::task]
pub async fn encoder_task(
    inputs: &'static SharedInputs<DEBOUNCE_WINDOW>,
    mut phase_a: Input<'static>,
    mut phase_b: Input<'static>,
) {
    info!("Encoder task started");

    loop {
        select(phase_a.wait_for_any_edge(), phase_b.wait_for_any_edge()).await;

        let symbol = Symbol::from_active_low(phase_a.is_high(), phase_b.is_high());
        trace!("Encoder symbol {}", symbol.code());
        inputs.record_transition(symbol);
    }
}
