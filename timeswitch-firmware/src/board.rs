//! Blue Pill board wiring
//!
//! | signal | pin |
//! |---|---|
//! | console TX / RX (USART1, remapped) | PB6 / PB7 |
//! | LCD SCL / SDA (I2C1, remapped) | PB8 / PB9 |
//! | controlled device | PB1 |
//! | schedule indicator LED | PB2 |
//! | UP / DOWN / ENTER / ESC buttons (to ground) | PA0 / PA1 / PA2 / PA3 |

use embassy_stm32::i2c::{mode::Master, I2c};
use embassy_stm32::mode::Blocking;
use embassy_time::Delay;

use timeswitch_core::Controller;
use timeswitch_hal::ActiveLowButtons;
use timeswitch_hal_stm32f1::{DigitalIn, DigitalOut, Lcd1602, RtcBackup};

/// Console baud rate
pub const CONSOLE_BAUD: u32 = 9600;

/// LCD bus frequency in kHz
pub const LCD_I2C_KHZ: u32 = 100;

/// The four menu buttons
pub type Buttons = ActiveLowButtons<
    DigitalIn<'static>,
    DigitalIn<'static>,
    DigitalIn<'static>,
    DigitalIn<'static>,
>;

/// 16x2 LCD on I2C1
pub type Display = Lcd1602<I2c<'static, Blocking, Master>, Delay>;

/// The application with this board's collaborators
pub type Clock = Controller<RtcBackup, DigitalOut<'static>, DigitalOut<'static>>;
