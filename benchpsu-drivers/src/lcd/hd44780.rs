//! HD44780 character LCD driver
//!
//! Drives a 16x2 HD44780 compatible module in 4-bit mode. R/W is tied to
//! ground, so the busy flag is never read and every command waits out its
//! worst-case execution time instead.

use benchpsu_core::traits::{CharacterDisplay, DisplayError};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Visible columns per row
pub const COLS: u8 = 16;

/// Visible rows
pub const ROWS: u8 = 2;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

/// HD44780 instructions
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    /// Cursor moves right, no display shift
    pub const ENTRY_INCREMENT: u8 = 0x06;
    pub const DISPLAY_OFF: u8 = 0x08;
    /// Display on, underline cursor on, blink off
    pub const DISPLAY_ON_CURSOR: u8 = 0x0E;
    /// 4-bit bus, two lines, 5x8 font
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    /// Soft reset nibble, sent three times
    pub const RESET_NIBBLE: u8 = 0x3;
    /// Switch to 4-bit bus
    pub const FOUR_BIT_NIBBLE: u8 = 0x2;
}

/// Delay after power-up before the first instruction (ms)
const POWER_UP_MS: u32 = 30;
/// Delay after the first reset nibble (us)
const FIRST_RESET_US: u32 = 5_000;
/// Delay after each E pulse (us)
const NIBBLE_SETTLE_US: u32 = 220;
/// Execution time of most instructions (us)
const COMMAND_US: u32 = 55;
/// Execution time of clear and home (us)
const CLEAR_US: u32 = 2_000;
/// Minimum E high time (ns)
const ENABLE_PULSE_NS: u32 = 500;

/// LCD driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// A control or data pin could not be driven
    Pin,
    /// Write would land outside the visible grid
    OutOfRange,
}

impl From<LcdError> for DisplayError {
    fn from(e: LcdError) -> Self {
        match e {
            LcdError::Pin => DisplayError::Communication,
            LcdError::OutOfRange => DisplayError::InvalidCoordinates,
        }
    }
}

/// HD44780 in 4-bit mode
///
/// `data` holds DB4..DB7 in that order.
pub struct Hd44780<P, D> {
    rs: P,
    enable: P,
    data: [P; 4],
    delay: D,
}

impl<P, D> Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a driver; call [`init`](Self::init) before writing
    pub fn new(rs: P, enable: P, data: [P; 4], delay: D) -> Self {
        Self {
            rs,
            enable,
            data,
            delay,
        }
    }

    /// Run the power-on soft reset and configure the module
    ///
    /// Leaves the display cleared, cursor visible at the home position.
    pub fn init(&mut self) -> Result<(), LcdError> {
        self.delay.delay_ms(POWER_UP_MS);
        set(&mut self.rs, false)?;

        self.nibble(cmd::RESET_NIBBLE)?;
        self.delay.delay_us(FIRST_RESET_US);
        self.nibble(cmd::RESET_NIBBLE)?;
        self.nibble(cmd::RESET_NIBBLE)?;
        self.nibble(cmd::FOUR_BIT_NIBBLE)?;

        self.command(cmd::FUNCTION_SET_4BIT_2LINE)?;
        self.command(cmd::DISPLAY_OFF)?;
        self.command(cmd::CLEAR)?;
        self.command(cmd::ENTRY_INCREMENT)?;
        self.command(cmd::DISPLAY_ON_CURSOR)?;
        self.command(cmd::HOME)
    }

    /// Move the DDRAM address to a grid position
    fn goto(&mut self, row: u8, col: u8) -> Result<(), LcdError> {
        let offset = ROW_OFFSETS
            .get(row as usize)
            .ok_or(LcdError::OutOfRange)?;
        if col >= COLS {
            return Err(LcdError::OutOfRange);
        }
        self.command(cmd::SET_DDRAM_ADDR | (offset + col))
    }

    fn command(&mut self, byte: u8) -> Result<(), LcdError> {
        set(&mut self.rs, false)?;
        self.byte(byte)?;
        let wait = match byte {
            cmd::CLEAR | cmd::HOME => CLEAR_US,
            _ => COMMAND_US,
        };
        self.delay.delay_us(wait);
        Ok(())
    }

    fn write_data(&mut self, byte: u8) -> Result<(), LcdError> {
        set(&mut self.rs, true)?;
        self.byte(byte)?;
        self.delay.delay_us(COMMAND_US);
        Ok(())
    }

    /// High nibble first
    fn byte(&mut self, byte: u8) -> Result<(), LcdError> {
        self.nibble(byte >> 4)?;
        self.nibble(byte & 0x0F)
    }

    /// Present a nibble on DB4..DB7 and latch it on the falling edge of E
    fn nibble(&mut self, nibble: u8) -> Result<(), LcdError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            set(pin, nibble & (1 << bit) != 0)?;
        }
        set(&mut self.enable, true)?;
        self.delay.delay_ns(ENABLE_PULSE_NS);
        set(&mut self.enable, false)?;
        self.delay.delay_us(NIBBLE_SETTLE_US);
        Ok(())
    }
}

fn set<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), LcdError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| LcdError::Pin)
}

impl<P, D> CharacterDisplay for Hd44780<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn write_at(&mut self, row: u8, col: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        if col as usize + bytes.len() > COLS as usize {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.goto(row, col)?;
        for &b in bytes {
            self.write_data(b)?;
        }
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.goto(row, col)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::rc::Rc;
    use std::vec::Vec;

    const RS: usize = 4;
    const E: usize = 5;

    #[derive(Debug)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Pin levels plus every nibble latched by a falling E edge
    #[derive(Default)]
    struct Bus {
        levels: [bool; 6],
        latched: Vec<(bool, u8)>,
        broken: bool,
    }

    impl Bus {
        /// Reassemble latched nibbles into (rs, byte) pairs, skipping the
        /// four single reset nibbles
        fn bytes(&self) -> Vec<(bool, u8)> {
            self.latched[4..]
                .chunks(2)
                .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
                .collect()
        }
    }

    struct MockPin {
        index: usize,
        bus: Rc<RefCell<Bus>>,
    }

    impl ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), MockError> {
            let mut bus = self.bus.borrow_mut();
            if bus.broken {
                return Err(MockError);
            }
            if self.index == E && bus.levels[E] {
                let nibble = (0..4).fold(0u8, |acc, bit| acc | (bus.levels[bit] as u8) << bit);
                let rs = bus.levels[RS];
                bus.latched.push((rs, nibble));
            }
            bus.levels[self.index] = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), MockError> {
            let mut bus = self.bus.borrow_mut();
            if bus.broken {
                return Err(MockError);
            }
            bus.levels[self.index] = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    fn lcd() -> (Hd44780<MockPin, MockDelay>, Rc<RefCell<Bus>>) {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let pin = |index| MockPin {
            index,
            bus: bus.clone(),
        };
        let lcd = Hd44780::new(
            pin(RS),
            pin(E),
            [pin(0), pin(1), pin(2), pin(3)],
            MockDelay::default(),
        );
        (lcd, bus)
    }

    #[test]
    fn test_init_sequence() {
        let (mut lcd, bus) = lcd();
        lcd.init().unwrap();

        let bus = bus.borrow();
        let resets: Vec<u8> = bus.latched[..4].iter().map(|&(_, n)| n).collect();
        assert_eq!(resets, [0x3, 0x3, 0x3, 0x2]);

        let commands: Vec<(bool, u8)> = bus.bytes();
        assert_eq!(
            commands,
            [
                (false, 0x28),
                (false, 0x08),
                (false, 0x01),
                (false, 0x06),
                (false, 0x0E),
                (false, 0x02)
            ]
        );
        // Power-up wait alone is 30 ms
        assert!(lcd.delay.total_ns >= 30_000_000);
    }

    #[test]
    fn test_write_second_row() {
        let (mut lcd, bus) = lcd();
        lcd.init().unwrap();
        bus.borrow_mut().latched.clear();
        // Keep four dummy entries so bytes() skips the same prefix
        bus.borrow_mut().latched.extend([(false, 0); 4]);

        lcd.write_at(1, 2, b"OE").unwrap();
        assert_eq!(
            bus.borrow().bytes(),
            [(false, 0x80 | 0x42), (true, b'O'), (true, b'E')]
        );
    }

    #[test]
    fn test_set_cursor_address() {
        let (mut lcd, bus) = lcd();
        bus.borrow_mut().latched.extend([(false, 0); 4]);

        lcd.set_cursor(0, 10).unwrap();
        assert_eq!(bus.borrow().bytes(), [(false, 0x8A)]);
    }

    #[test]
    fn test_out_of_range() {
        let (mut lcd, bus) = lcd();
        assert_eq!(
            lcd.write_at(2, 0, b"x"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            lcd.write_at(0, 15, b"xy"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(lcd.set_cursor(0, 16), Err(DisplayError::InvalidCoordinates));
        assert!(bus.borrow().latched.is_empty());
    }

    #[test]
    fn test_full_row_fits() {
        let (mut lcd, _bus) = lcd();
        assert_eq!(lcd.write_at(0, 0, b"05.00V 0200mA CV"), Ok(()));
    }

    #[test]
    fn test_pin_failure() {
        let (mut lcd, bus) = lcd();
        bus.borrow_mut().broken = true;
        assert_eq!(lcd.init(), Err(LcdError::Pin));
        assert_eq!(lcd.set_cursor(0, 0), Err(DisplayError::Communication));
    }
}
