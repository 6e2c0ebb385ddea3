//! Schedule record and device state transitions

use crate::calendar::{Date, DateTime, Time};

/// External device state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    #[default]
    Off,
    On,
}

impl DeviceState {
    pub fn is_on(&self) -> bool {
        matches!(self, DeviceState::On)
    }

    /// Label used on the display and console
    pub fn label(&self) -> &'static str {
        match self {
            DeviceState::On => "ON",
            DeviceState::Off => "OFF",
        }
    }

    /// Move towards a target state
    ///
    /// The edge is set only when the state actually changes.
    pub fn transition(self, target: DeviceState) -> Transition {
        Transition {
            state: target,
            edge: (self != target).then_some(target),
        }
    }
}

/// Outcome of [`DeviceState::transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// State after the transition
    pub state: DeviceState,
    /// New state, if it differs from the previous one
    pub edge: Option<DeviceState>,
}

/// On/off window for the device
///
/// `date: None` applies the window every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Schedule {
    pub enabled: bool,
    pub on_time: Time,
    pub off_time: Time,
    pub date: Option<Date>,
}

impl Schedule {
    /// Disabled schedule with an empty window
    pub const fn new() -> Self {
        Self {
            enabled: false,
            on_time: Time::MIDNIGHT,
            off_time: Time::MIDNIGHT,
            date: None,
        }
    }

    pub fn set_on_time(&mut self, time: Time) {
        self.on_time = time;
    }

    pub fn set_off_time(&mut self, time: Time) {
        self.off_time = time;
    }

    pub fn set_date(&mut self, date: Option<Date>) {
        self.date = date;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Check whether `date` is a day this schedule runs on
    pub fn applies_on(&self, date: &Date) -> bool {
        match &self.date {
            Some(scheduled) => scheduled.same_day(date),
            None => true,
        }
    }

    /// Device state the schedule asks for at `now`
    ///
    /// The window is half-open: on at `on_time`, off again at `off_time`.
    /// A window with `on_time >= off_time` never switches the device on.
    pub fn target(&self, now: &DateTime) -> DeviceState {
        if !self.enabled || !self.applies_on(&now.date) {
            return DeviceState::Off;
        }

        let now = now.time.seconds_of_day();
        let on = self.on_time.seconds_of_day();
        let off = self.off_time.seconds_of_day();

        if on <= now && now < off {
            DeviceState::On
        } else {
            DeviceState::Off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u8, m: u8, s: u8) -> DateTime {
        DateTime::new(Date::new(15, 6, 2025).unwrap(), Time::new(h, m, s).unwrap())
    }

    fn office_hours() -> Schedule {
        Schedule {
            enabled: true,
            on_time: Time::new(8, 0, 0).unwrap(),
            off_time: Time::new(18, 0, 0).unwrap(),
            date: None,
        }
    }

    #[test]
    fn test_window_edges() {
        let schedule = office_hours();
        assert_eq!(schedule.target(&at(7, 59, 59)), DeviceState::Off);
        assert_eq!(schedule.target(&at(8, 0, 0)), DeviceState::On);
        assert_eq!(schedule.target(&at(17, 59, 59)), DeviceState::On);
        assert_eq!(schedule.target(&at(18, 0, 0)), DeviceState::Off);
    }

    #[test]
    fn test_disabled_is_off() {
        let mut schedule = office_hours();
        schedule.disable();
        assert_eq!(schedule.target(&at(12, 0, 0)), DeviceState::Off);
    }

    #[test]
    fn test_dated_schedule() {
        let mut schedule = office_hours();
        schedule.set_date(Some(Date::new(15, 6, 2025).unwrap()));
        assert_eq!(schedule.target(&at(12, 0, 0)), DeviceState::On);

        schedule.set_date(Some(Date::new(16, 6, 2025).unwrap()));
        assert_eq!(schedule.target(&at(12, 0, 0)), DeviceState::Off);
    }

    #[test]
    fn test_midnight_crossing_window_is_off() {
        let mut schedule = office_hours();
        schedule.set_on_time(Time::new(22, 0, 0).unwrap());
        schedule.set_off_time(Time::new(6, 0, 0).unwrap());
        assert_eq!(schedule.target(&at(23, 0, 0)), DeviceState::Off);
        assert_eq!(schedule.target(&at(3, 0, 0)), DeviceState::Off);
    }

    #[test]
    fn test_empty_window_is_off() {
        let mut schedule = office_hours();
        schedule.set_off_time(schedule.on_time);
        assert_eq!(schedule.target(&at(8, 0, 0)), DeviceState::Off);
    }

    #[test]
    fn test_setters_leave_enabled_alone() {
        let mut schedule = Schedule::new();
        schedule.set_on_time(Time::new(1, 0, 0).unwrap());
        schedule.set_off_time(Time::new(2, 0, 0).unwrap());
        assert!(!schedule.enabled);
    }

    #[test]
    fn test_transition_edges() {
        let t = DeviceState::Off.transition(DeviceState::On);
        assert_eq!(t.state, DeviceState::On);
        assert_eq!(t.edge, Some(DeviceState::On));

        let t = DeviceState::On.transition(DeviceState::On);
        assert_eq!(t.state, DeviceState::On);
        assert_eq!(t.edge, None);

        let t = DeviceState::On.transition(DeviceState::Off);
        assert_eq!(t.edge, Some(DeviceState::Off));
    }
}
