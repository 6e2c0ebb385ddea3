//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins, plus the button bank
//! the keypad scanner samples.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Raw button levels, sampled synchronously without debouncing
pub trait ButtonBank {
    /// Read the pressed mask: bit 0 UP, bit 1 DOWN, bit 2 ENTER, bit 3 ESC.
    /// A set bit means the button is pressed.
    fn read_raw_mask(&mut self) -> u8;
}

/// Four buttons wired to ground with pull-ups
pub struct ActiveLowButtons<U, D, E, X> {
    up: U,
    down: D,
    enter: E,
    esc: X,
}

impl<U, D, E, X> ActiveLowButtons<U, D, E, X>
where
    U: InputPin,
    D: InputPin,
    E: InputPin,
    X: InputPin,
{
    /// Create a bank from the four button pins
    pub fn new(up: U, down: D, enter: E, esc: X) -> Self {
        Self {
            up,
            down,
            enter,
            esc,
        }
    }
}

impl<U, D, E, X> ButtonBank for ActiveLowButtons<U, D, E, X>
where
    U: InputPin,
    D: InputPin,
    E: InputPin,
    X: InputPin,
{
    fn read_raw_mask(&mut self) -> u8 {
        let mut mask = 0;
        if self.up.is_low() {
            mask |= 1 << 0;
        }
        if self.down.is_low() {
            mask |= 1 << 1;
        }
        if self.enter.is_low() {
            mask |= 1 << 2;
        }
        if self.esc.is_low() {
            mask |= 1 << 3;
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_idle_buttons_read_zero() {
        let mut bank =
            ActiveLowButtons::new(Level(true), Level(true), Level(true), Level(true));
        assert_eq!(bank.read_raw_mask(), 0);
    }

    #[test]
    fn test_pressed_buttons_set_bits() {
        let mut bank =
            ActiveLowButtons::new(Level(false), Level(true), Level(false), Level(true));
        assert_eq!(bank.read_raw_mask(), 0b0101);

        let mut bank =
            ActiveLowButtons::new(Level(true), Level(true), Level(true), Level(false));
        assert_eq!(bank.read_raw_mask(), 0b1000);
    }
}
