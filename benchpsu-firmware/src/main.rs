//! BenchPSU - Bench Power Supply Front Panel Firmware
//!
//! Main firmware binary for RP2040-based panel controllers. Two buttons
//! move an edit cursor over the set-point digits, a rotary encoder changes
//! the digit under it, and two more buttons toggle the output and the
//! regulation mode. A 16x2 character LCD shows set-points and readings.
//!
//! Input sampling runs on a high-priority interrupt executor so it
//! preempts the foreground panel loop, which runs on the thread executor.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::{Executor, InterruptExecutor};
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use benchpsu_core::input::SharedInputs;
use benchpsu_drivers::lcd::Hd44780;

use crate::adc::BoardAdc;
use crate::config::{DEBOUNCE_WINDOW, PANEL_CONFIG};
use crate::tasks::{ButtonPins, PanelDrivers};

mod adc;
mod config;
mod tasks;

/// PWM counter top: 125 MHz / 15000 ~ 8.3 kHz reference ripple
const PWM_TOP: u16 = 14_999;

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

// Input block shared between the sampling tasks and the panel loop
static INPUTS: StaticCell<SharedInputs<DEBOUNCE_WINDOW>> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[entry]
fn main() -> ! {
    info!("BenchPSU firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    info!(
        "Panel config: V {}..{} (initial {}), I {}..{} (initial {}), ceiling {}",
        PANEL_CONFIG.voltage.min,
        PANEL_CONFIG.voltage.max,
        PANEL_CONFIG.voltage.initial,
        PANEL_CONFIG.current.min,
        PANEL_CONFIG.current.max,
        PANEL_CONFIG.current.initial,
        PANEL_CONFIG.dispatch.safe_voltage_ceiling
    );

    let inputs: &'static SharedInputs<DEBOUNCE_WINDOW> = INPUTS.init(SharedInputs::new());

    // Front panel buttons (active low, GPIO2-5) and encoder phases (GPIO6/7)
    let buttons = ButtonPins {
        mode: Input::new(p.PIN_2, Pull::Up),
        output_enable: Input::new(p.PIN_3, Pull::Up),
        cursor_left: Input::new(p.PIN_4, Pull::Up),
        cursor_right: Input::new(p.PIN_5, Pull::Up),
    };
    let phase_a = Input::new(p.PIN_6, Pull::Up);
    let phase_b = Input::new(p.PIN_7, Pull::Up);

    // HD44780: RS=GPIO8, E=GPIO9, DB4-DB7=GPIO10-13
    let lcd = Hd44780::new(
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        [
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
        ],
        Delay,
    );

    // Regulator references: slice 7, A=GPIO14 voltage, B=GPIO15 current
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = 0;
    pwm_config.compare_b = 0;
    let pwm = Pwm::new_output_ab(p.PWM_SLICE7, p.PIN_14, p.PIN_15, pwm_config);
    let (voltage_pwm, current_pwm) = pwm.split();

    // Output sense: GPIO26 voltage divider, GPIO27 shunt amplifier
    let adc = BoardAdc::new(
        Adc::new_blocking(p.ADC, AdcConfig::default()),
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
    );
    info!("Panel I/O initialized");

    let drivers = PanelDrivers {
        adc,
        voltage_pwm: unwrap!(voltage_pwm),
        current_pwm: unwrap!(current_pwm),
        lcd,
    };

    // Sampling tasks preempt the panel loop
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    spawner.spawn(tasks::sampler_task(inputs, buttons)).unwrap();
    spawner
        .spawn(tasks::encoder_task(inputs, phase_a, phase_b))
        .unwrap();

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(tasks::panel_task(inputs, drivers)).unwrap();
        info!("All tasks spawned, firmware running");
    })
}
