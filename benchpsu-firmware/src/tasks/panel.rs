//! Panel task
//!
//! Runs the control dispatcher forever on the thread executor. Driver
//! failures are logged and the loop carries on; the panel must stay
//! responsive even with a dead ADC or a loose display cable.

use benchpsu_core::control::{Dispatcher, PanelError, State};
use benchpsu_core::input::SharedInputs;
use benchpsu_drivers::actuator::PwmActuator;
use benchpsu_drivers::lcd::Hd44780;
use benchpsu_drivers::measure::ScaledMeter;
use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::PwmOutput;
use embassy_time::Delay;

use crate::adc::BoardAdc;
use crate::config::{DEBOUNCE_WINDOW, PANEL_CONFIG};

/// Collaborator drivers handed to the panel task
pub struct PanelDrivers {
    pub adc: BoardAdc,
    pub voltage_pwm: PwmOutput<'static>,
    pub current_pwm: PwmOutput<'static>,
    pub lcd: Hd44780<Output<'static>, Delay>,
}

/// Panel task - the foreground dispatcher loop
#[embassy_executor::task]
pub async fn panel_task(inputs: &'static SharedInputs<DEBOUNCE_WINDOW>, drivers: PanelDrivers) {
    info!("Panel task started");

    let PanelDrivers {
        adc,
        voltage_pwm,
        current_pwm,
        mut lcd,
    } = drivers;

    if let Err(e) = lcd.init() {
        warn!("LCD init failed: {:?}", e);
    }

    let mut actuator = PwmActuator::new(voltage_pwm, current_pwm, PANEL_CONFIG.actuator);
    if let Err(e) = actuator.off() {
        // Both channels are written again on the next output change
        warn!("Failed to zero the regulator references: {:?}", e);
    }
    let meter = ScaledMeter::new(adc, PANEL_CONFIG.measurement);

    let mut dispatcher = Dispatcher::new(&PANEL_CONFIG, inputs, meter, actuator, lcd);
    info!("Dispatcher running, initial state {:?}", dispatcher.state());

    loop {
        let result = dispatcher.step();
        let next = dispatcher.state();

        match result {
            Ok(State::Idle) if next == State::Idle => {}
            Ok(State::DisplayRefresh) => trace!("Display refreshed"),
            Ok(ran) => {
                debug!("{:?} -> {:?}", ran, next);
                if ran == State::ActuatorUpdate {
                    let model = dispatcher.machine().model();
                    debug!(
                        "Output enabled={} mode={:?}, targets {}cV {}mA",
                        model.status.enabled,
                        model.status.mode,
                        model.targets.voltage,
                        model.targets.current
                    );
                }
            }
            Err(PanelError::Measure(e)) => {
                warn!("Measurement failed, keeping last values: {:?}", e)
            }
            Err(PanelError::Actuator(e)) => warn!("Actuator update failed: {:?}", e),
            Err(PanelError::Display(e)) => warn!("Display write failed: {:?}", e),
        }

        yield_now().await;
    }
}
