//! Console command execution
//!
//! Applies parsed [`Command`]s to the clock store and writes the replies.
//! Every reply ends with the prompt.

use core::fmt::{self, Write};

use timeswitch_console::{Command, CommandError, Dmy, Hms, HELP_TEXT};
use timeswitch_hal::BackupDomain;

use crate::calendar::{expand_year, Date, DateTime, Time};
use crate::clock::ClockStore;
use crate::controller::OutputError;
use crate::schedule::{DeviceState, Schedule};

/// Shown after every reply
pub const PROMPT: &str = "> ";

/// Replaces the success line when the RTC counter rejects a write
pub const CLOCK_WRITE_FAILED: &str = "RTC write failed, time not set\r\n";

/// Printed once at boot
pub const BANNER: &str = "\r\nSTM32 Clock System Ready\r\nType 'help' for commands\r\n";

fn time_arg(hms: &Hms) -> Time {
    Time::clamped(hms.hours, hms.minutes, hms.seconds)
}

fn date_arg(dmy: &Dmy) -> Date {
    Date::clamped(dmy.day, dmy.month, expand_year(dmy.year))
}

/// Parse a complete line and execute it
///
/// Returns the command when it parsed.
pub fn dispatch<B: BackupDomain, W: Write>(
    line: &str,
    clock: &mut ClockStore<B>,
    device: DeviceState,
    out: &mut W,
) -> Result<Option<Command>, OutputError> {
    match Command::parse(line) {
        Ok(command) => {
            execute(&command, clock, device, out)?;
            Ok(Some(command))
        }
        Err(error) => {
            report_error(error, line, out)?;
            out.write_str(PROMPT)?;
            Ok(None)
        }
    }
}

/// Execute a command, then print the prompt
///
/// A failed clock write prints [`CLOCK_WRITE_FAILED`] and the prompt before
/// the error is returned.
pub fn execute<B: BackupDomain, W: Write>(
    command: &Command,
    clock: &mut ClockStore<B>,
    device: DeviceState,
    out: &mut W,
) -> Result<(), OutputError> {
    let mut written = Ok(());
    match command {
        Command::SetTime(hms) => {
            written = clock.set_time(time_arg(hms));
            if written.is_ok() {
                out.write_str("Time set successfully\r\n")?;
            }
        }
        Command::SetDate(dmy) => {
            written = clock.set_date(date_arg(dmy));
            if written.is_ok() {
                out.write_str("Date set successfully\r\n")?;
            }
        }
        Command::ScheduleOn(hms) => {
            let time = time_arg(hms);
            clock.update_schedule(|s| s.set_on_time(time));
            out.write_str("ON time set successfully\r\n")?;
        }
        Command::ScheduleOff(hms) => {
            let time = time_arg(hms);
            clock.update_schedule(|s| s.set_off_time(time));
            out.write_str("OFF time set successfully\r\n")?;
        }
        Command::ScheduleDate(dmy) => {
            let date = date_arg(dmy);
            clock.update_schedule(|s| s.set_date(Some(date)));
            out.write_str("Schedule date set successfully\r\n")?;
        }
        Command::EnableSchedule => {
            clock.update_schedule(Schedule::enable);
            out.write_str("Schedule enabled\r\n")?;
        }
        Command::DisableSchedule => {
            clock.update_schedule(Schedule::disable);
            out.write_str("Schedule disabled\r\n")?;
        }
        Command::Status => {
            let now = clock.now();
            write_status(out, &now, clock.schedule(), device)?;
        }
        Command::Help => out.write_str(HELP_TEXT)?,
    }

    if written.is_err() {
        out.write_str(CLOCK_WRITE_FAILED)?;
    }
    out.write_str(PROMPT)?;
    Ok(written?)
}

/// One-line diagnostic for a line that did not parse
pub fn report_error<W: Write>(error: CommandError, line: &str, out: &mut W) -> fmt::Result {
    match error {
        CommandError::Empty => Ok(()),
        CommandError::Unknown => write!(
            out,
            "Unknown command: {}\r\nType 'help' for available commands\r\n",
            line.trim_start_matches(' ')
        ),
        CommandError::InvalidArguments(kind) => write!(
            out,
            "Invalid arguments, expected {}\r\n",
            kind.template()
        ),
    }
}

/// Periodic date/time line
pub fn write_time_report<W: Write>(out: &mut W, now: &DateTime) -> fmt::Result {
    write!(out, "Date: {} Time: {}\r\n", now.date, now.time)
}

/// Reply to `status`
pub fn write_status<W: Write>(
    out: &mut W,
    now: &DateTime,
    schedule: &Schedule,
    device: DeviceState,
) -> fmt::Result {
    write_time_report(out, now)?;
    write!(
        out,
        "Schedule: {}\r\n",
        if schedule.enabled { "Enabled" } else { "Disabled" }
    )?;
    write!(out, "ON: {}, OFF: {}\r\n", schedule.on_time, schedule.off_time)?;
    match &schedule.date {
        Some(date) => write!(out, "Date: {}\r\n", date)?,
        None => out.write_str("Date: daily\r\n")?,
    }
    write!(out, "Device: {}\r\n", device.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    fn at(h: u8, m: u8, s: u8) -> DateTime {
        DateTime::new(Date::new(2, 3, 2025).unwrap(), Time::new(h, m, s).unwrap())
    }

    #[test]
    fn test_status_text() {
        let schedule = Schedule {
            enabled: true,
            on_time: Time::new(8, 0, 0).unwrap(),
            off_time: Time::new(18, 0, 0).unwrap(),
            date: None,
        };
        let mut out = String::<256>::new();
        write_status(&mut out, &at(9, 5, 7), &schedule, DeviceState::On).unwrap();
        assert_eq!(
            out.as_str(),
            "Date: 02/03/2025 Time: 09:05:07\r\n\
             Schedule: Enabled\r\n\
             ON: 08:00:00, OFF: 18:00:00\r\n\
             Date: daily\r\n\
             Device: ON\r\n"
        );
    }

    #[test]
    fn test_unknown_diagnostic() {
        let mut out = String::<128>::new();
        report_error(CommandError::Unknown, "  bogus command", &mut out).unwrap();
        assert_eq!(
            out.as_str(),
            "Unknown command: bogus command\r\nType 'help' for available commands\r\n"
        );
    }

    #[test]
    fn test_invalid_arguments_diagnostic() {
        let mut out = String::<64>::new();
        report_error(
            CommandError::InvalidArguments(timeswitch_console::ArgumentKind::Date),
            "set date 1:2",
            &mut out,
        )
        .unwrap();
        assert_eq!(out.as_str(), "Invalid arguments, expected DD:MM:YY\r\n");
    }

    #[test]
    fn test_arguments_are_clamped() {
        let time = time_arg(&Hms {
            hours: 25,
            minutes: 61,
            seconds: 5,
        });
        assert_eq!(time, Time::new(23, 59, 5).unwrap());

        let date = date_arg(&Dmy {
            day: 31,
            month: 4,
            year: 25,
        });
        assert_eq!(date, Date::new(30, 4, 2025).unwrap());
    }
}
