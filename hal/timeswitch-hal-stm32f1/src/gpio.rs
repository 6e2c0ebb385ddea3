//! GPIO wrappers for STM32F1
//!
//! Newtypes over the embassy pin drivers so they can implement the
//! `timeswitch-hal` pin traits.

use embassy_stm32::gpio::{Input, Output};
use timeswitch_hal::{InputPin, OutputPin};

/// Push-pull output
pub struct DigitalOut<'d> {
    pin: Output<'d>,
}

impl<'d> DigitalOut<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for DigitalOut<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Digital input
pub struct DigitalIn<'d> {
    pin: Input<'d>,
}

impl<'d> DigitalIn<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl InputPin for DigitalIn<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
