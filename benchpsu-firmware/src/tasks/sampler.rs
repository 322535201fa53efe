//! Button sampler task
//!
//! Samples the four front panel buttons at a fixed rate into the debounce
//! ring. Each tick also advances the display refresh counter.

use benchpsu_core::input::{Buttons, SharedInputs};
use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use crate::config::{DEBOUNCE_WINDOW, PANEL_CONFIG};

/// Button inputs, all active low with pull-ups
pub struct ButtonPins {
    pub mode: Input<'static>,
    pub output_enable: Input<'static>,
    pub cursor_left: Input<'static>,
    pub cursor_right: Input<'static>,
}

impl ButtonPins {
    /// Current levels, normalized to active high
    fn read(&self) -> Buttons {
        Buttons::from_active_low(&[
            (Buttons::MODE, self.mode.is_high()),
            (Buttons::OUTPUT_ENABLE, self.output_enable.is_high()),
            (Buttons::CURSOR_LEFT, self.cursor_left.is_high()),
            (Buttons::CURSOR_RIGHT, self.cursor_right.is_high()),
        ])
    }
}

/// Sampler task - one raw button sample per tick
#[embassy_executor::task]
pub async fn sampler_task(inputs: &'static SharedInputs<DEBOUNCE_WINDOW>, pins: ButtonPins) {
    let period_us = PANEL_CONFIG.sampling.period_us;
    info!(
        "Sampler task started: {}us period, {} sample window",
        period_us, DEBOUNCE_WINDOW
    );

    let mut ticker = Ticker::every(Duration::from_micros(period_us as u64));

    loop {
        ticker.next().await;
        inputs.sample(pins.read());
    }
}
