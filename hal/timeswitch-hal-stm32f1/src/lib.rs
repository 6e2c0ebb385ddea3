//! STM32F1-specific HAL for the Timeswitch clock
//!
//! This crate implements the `timeswitch-hal` traits for STM32F1 series
//! chips on top of `embassy-stm32`:
//!
//! - STM32F103C8 (Blue Pill)
//!
//! # Features
//!
//! - `stm32f103c8` / `stm32f103cb` - Select the chip
//! - `defmt` - Enable debug formatting support
//!
//! # Modules
//!
//! - [`backup`] - RTC counter and BKP data registers
//! - [`gpio`] - Output and input pin wrappers
//! - [`uart`] - Buffered USART transmitter for the console
//! - [`lcd`] - HD44780 character LCD behind a PCF8574 I2C expander

#![no_std]

pub mod backup;
pub mod gpio;
pub mod lcd;
pub mod uart;

pub use backup::RtcBackup;
pub use gpio::{DigitalIn, DigitalOut};
pub use lcd::Lcd1602;
pub use uart::ConsoleTx;
