//! HD44780 1602 LCD behind a PCF8574 I2C backpack
//!
//! The expander drives the LCD in 4-bit mode. Each expander byte carries
//! one nibble on P4..P7 plus the RS, E and backlight lines; RW is tied low.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use timeswitch_hal::display::{COLS, ROWS};
use timeswitch_hal::{CharDisplay, DisplayError};

/// Usual backpack address with A0..A2 open
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const ENABLE: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06;
const CMD_DISPLAY_OFF: u8 = 0x08;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_CURSOR_ON: u8 = 0x0E;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of each row
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40];

/// 16x2 character LCD
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Lcd1602<I2C, D> {
    /// Wrap the bus; call [`Lcd1602::init`] before use
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Run the 4-bit power-on sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);
        self.expander_write(BACKLIGHT)?;

        for wait_us in [4500, 150, 150] {
            self.write_nibble(0x30, 0)?;
            self.delay.delay_us(wait_us);
        }
        self.write_nibble(0x20, 0)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_OFF)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE)?;
        self.command(CMD_DISPLAY_ON)
    }

    fn expander_write(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[byte | BACKLIGHT])
            .map_err(|_| DisplayError::Bus)
    }

    /// Latch the high nibble of `bits` with E pulsed
    fn write_nibble(&mut self, bits: u8, mode: u8) -> Result<(), DisplayError> {
        let byte = (bits & 0xF0) | mode;
        self.expander_write(byte | ENABLE)?;
        self.delay.delay_us(1);
        self.expander_write(byte)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(value, mode)?;
        self.write_nibble(value << 4, mode)
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.send(command, 0)
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C: I2c, D: DelayNs> CharDisplay for Lcd1602<I2C, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::OutOfBounds);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            let byte = if byte.is_ascii() { byte } else { b'?' };
            self.send(byte, RS)?;
        }
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError> {
        self.command(if visible { CMD_CURSOR_ON } else { CMD_DISPLAY_ON })
    }
}
