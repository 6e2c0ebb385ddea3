//! Button-driven menu
//!
//! ```text
//!            ENTER                       ESC
//!  EditTime <------- Normal ------------------> EditSchedule
//!     |  ESC (commit)  ^   ESC (abort) / ENTER past Off   |
//!     +----------------+----------------------------------+
//! ```
//!
//! Edits are made on copies and only reach the clock store through the
//! returned [`MenuAction`].

use core::fmt::Write;

use heapless::String;
use timeswitch_hal::display::COLS;
use timeswitch_hal::{CharDisplay, CharDisplayExt, DisplayError};

use super::keys::Key;
use crate::calendar::{DateTime, Time, TimeField};
use crate::schedule::{DeviceState, Schedule};

type Line = String<{ COLS as usize }>;

/// Top-level menu mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuMode {
    #[default]
    Normal,
    EditTime,
    EditSchedule,
}

/// Schedule field selected while in [`MenuMode::EditSchedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScheduleField {
    #[default]
    On,
    Off,
    Date,
}

impl ScheduleField {
    fn next(self) -> Self {
        match self {
            ScheduleField::On => ScheduleField::Off,
            ScheduleField::Off => ScheduleField::Date,
            ScheduleField::Date => ScheduleField::On,
        }
    }
}

/// What the owner of the clock store must do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    /// Nothing to apply
    None,
    /// Set the time of day, keeping the current date
    CommitTime(Time),
    /// Store the schedule window and enable the schedule
    CommitSchedule { on: Time, off: Time },
    /// Edit abandoned
    Cancelled,
}

/// Menu state
#[derive(Debug, Clone, Default)]
pub struct Menu {
    mode: MenuMode,
    cursor: u8,
    field: ScheduleField,
    time: Time,
    on: Time,
    off: Time,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> MenuMode {
        self.mode
    }

    /// Field position under the cursor (0 hours, 1 minutes, 2 seconds)
    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    pub fn schedule_field(&self) -> ScheduleField {
        self.field
    }

    /// Value currently being edited, if any
    pub fn editing(&self) -> Option<Time> {
        match (self.mode, self.field) {
            (MenuMode::EditTime, _) => Some(self.time),
            (MenuMode::EditSchedule, ScheduleField::On) => Some(self.on),
            (MenuMode::EditSchedule, ScheduleField::Off) => Some(self.off),
            _ => None,
        }
    }

    fn reset(&mut self) {
        self.mode = MenuMode::Normal;
        self.cursor = 0;
        self.field = ScheduleField::On;
    }

    /// Process one key
    pub fn handle(&mut self, key: Key, now: &DateTime, schedule: &Schedule) -> MenuAction {
        match self.mode {
            MenuMode::Normal => {
                match key {
                    Key::Enter => {
                        self.mode = MenuMode::EditTime;
                        self.cursor = 0;
                        self.time = now.time;
                    }
                    Key::Esc => {
                        self.mode = MenuMode::EditSchedule;
                        self.cursor = 0;
                        self.field = ScheduleField::On;
                        self.on = schedule.on_time;
                        self.off = schedule.off_time;
                    }
                    Key::Up | Key::Down => {}
                }
                MenuAction::None
            }

            MenuMode::EditTime => match key {
                Key::Up | Key::Down => {
                    self.time
                        .step_field(TimeField::from_cursor(self.cursor), key == Key::Up);
                    MenuAction::None
                }
                Key::Enter => {
                    self.cursor = (self.cursor + 1) % 3;
                    MenuAction::None
                }
                Key::Esc => {
                    self.reset();
                    MenuAction::CommitTime(self.time)
                }
            },

            MenuMode::EditSchedule => match key {
                Key::Up | Key::Down => {
                    let field = TimeField::from_cursor(self.cursor);
                    match self.field {
                        ScheduleField::On => self.on.step_field(field, key == Key::Up),
                        ScheduleField::Off => self.off.step_field(field, key == Key::Up),
                        ScheduleField::Date => {}
                    }
                    MenuAction::None
                }
                Key::Enter => {
                    self.field = self.field.next();
                    self.cursor = 0;
                    if self.field == ScheduleField::Date {
                        self.reset();
                        MenuAction::CommitSchedule {
                            on: self.on,
                            off: self.off,
                        }
                    } else {
                        MenuAction::None
                    }
                }
                Key::Esc => {
                    self.reset();
                    MenuAction::Cancelled
                }
            },
        }
    }

    /// Draw the screen for the current mode
    pub fn render<C: CharDisplay>(
        &self,
        display: &mut C,
        now: &DateTime,
        device: DeviceState,
    ) -> Result<(), DisplayError> {
        let mut line = Line::new();

        match self.editing() {
            None => {
                // Overflow only truncates the line
                let _ = write!(line, "Date:{}", now.date);
                display.write_row(0, &line)?;

                line.clear();
                let _ = write!(line, "Time:{}", now.time);
                if device.is_on() {
                    let _ = write!(line, " {}", device.label());
                }
                display.write_row(1, &line)?;
                display.set_cursor_visible(false)
            }
            Some(value) => {
                let title = match self.mode {
                    MenuMode::EditSchedule if self.field == ScheduleField::Off => "Schedule OFF:",
                    MenuMode::EditSchedule => "Schedule ON:",
                    _ => "Set Time:",
                };
                display.write_row(0, title)?;

                let _ = write!(line, "{}", value);
                display.write_row(1, &line)?;
                display.set_cursor(1, self.cursor * 3)?;
                display.set_cursor_visible(true)
            }
        }
    }
}
