//! Output driver for the schedule

use timeswitch_hal::OutputPin;

use super::record::{DeviceState, Schedule};
use crate::calendar::DateTime;

/// Drives the device output and its indicator LED from a [`Schedule`]
///
/// Pins are written only on a state edge.
pub struct ScheduleEngine<D: OutputPin, L: OutputPin> {
    device: D,
    indicator: L,
    state: DeviceState,
}

impl<D: OutputPin, L: OutputPin> ScheduleEngine<D, L> {
    /// Take ownership of the outputs and switch both off
    pub fn new(mut device: D, mut indicator: L) -> Self {
        device.set_low();
        indicator.set_low();
        Self {
            device,
            indicator,
            state: DeviceState::Off,
        }
    }

    /// Current device state
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Evaluate the schedule at `now`
    ///
    /// Returns the new state when it changed.
    pub fn evaluate(&mut self, schedule: &Schedule, now: &DateTime) -> Option<DeviceState> {
        let transition = self.state.transition(schedule.target(now));
        self.state = transition.state;

        if let Some(state) = transition.edge {
            let on = state.is_on();
            self.device.set_state(on);
            self.indicator.set_state(on);
        }

        transition.edge
    }

    /// Release the output pins
    pub fn release(self) -> (D, L) {
        (self.device, self.indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Date, Time};

    #[derive(Default)]
    struct Pin {
        high: bool,
        writes: u32,
    }

    impl OutputPin for Pin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn at(h: u8, m: u8, s: u8) -> DateTime {
        DateTime::new(Date::new(1, 1, 2025).unwrap(), Time::new(h, m, s).unwrap())
    }

    fn schedule() -> Schedule {
        Schedule {
            enabled: true,
            on_time: Time::new(8, 0, 0).unwrap(),
            off_time: Time::new(18, 0, 0).unwrap(),
            date: None,
        }
    }

    #[test]
    fn test_construction_deasserts() {
        let engine = ScheduleEngine::new(
            Pin {
                high: true,
                writes: 0,
            },
            Pin::default(),
        );
        assert_eq!(engine.state(), DeviceState::Off);
        let (device, indicator) = engine.release();
        assert!(!device.high);
        assert!(!indicator.high);
    }

    #[test]
    fn test_one_write_per_transition() {
        let mut engine = ScheduleEngine::new(Pin::default(), Pin::default());
        let schedule = schedule();

        assert_eq!(engine.evaluate(&schedule, &at(7, 59, 59)), None);
        assert_eq!(engine.evaluate(&schedule, &at(8, 0, 0)), Some(DeviceState::On));
        assert_eq!(engine.evaluate(&schedule, &at(12, 0, 0)), None);
        assert_eq!(engine.evaluate(&schedule, &at(17, 59, 59)), None);
        assert_eq!(engine.evaluate(&schedule, &at(18, 0, 0)), Some(DeviceState::Off));

        let (device, indicator) = engine.release();
        // One write at construction, one per edge
        assert_eq!(device.writes, 3);
        assert_eq!(indicator.writes, 3);
        assert!(!device.high);
    }

    #[test]
    fn test_disable_switches_off() {
        let mut engine = ScheduleEngine::new(Pin::default(), Pin::default());
        let mut schedule = schedule();
        engine.evaluate(&schedule, &at(9, 0, 0));
        assert!(engine.state().is_on());

        schedule.disable();
        assert_eq!(engine.evaluate(&schedule, &at(9, 0, 1)), Some(DeviceState::Off));
    }
}
