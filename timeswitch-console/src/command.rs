//! Command tokenizer for the serial console
//!
//! Recognized commands form a closed enum. Argument triples are kept raw
//! (range reduction happens where the values are applied) but must all be
//! present and numeric for a command to parse at all.

/// `HH:MM:SS` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hms {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// `DD:MM:YY` argument
///
/// `year` is as typed: two digits are an offset from 2000, four digits are a
/// full year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dmy {
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

/// Commands accepted on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `set time HH:MM:SS`
    SetTime(Hms),
    /// `set date DD:MM:YY`
    SetDate(Dmy),
    /// `schedule on HH:MM:SS`
    ScheduleOn(Hms),
    /// `schedule off HH:MM:SS`
    ScheduleOff(Hms),
    /// `schedule date DD:MM:YY`
    ScheduleDate(Dmy),
    /// `enable schedule`
    EnableSchedule,
    /// `disable schedule`
    DisableSchedule,
    /// `status`
    Status,
    /// `help`
    Help,
}

/// Reasons a line is not a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Nothing but whitespace
    Empty,
    /// No command matches the line
    Unknown,
    /// Command recognized, arguments missing or malformed
    InvalidArguments(ArgumentKind),
}

/// Expected argument layout, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentKind {
    Time,
    Date,
}

impl ArgumentKind {
    /// Argument template shown to the user
    pub fn template(self) -> &'static str {
        match self {
            ArgumentKind::Time => "HH:MM:SS",
            ArgumentKind::Date => "DD:MM:YY",
        }
    }
}

/// Command summary printed by `help`
pub const HELP_TEXT: &str = "\
=== Clock System Commands ===\r\n\
set time HH:MM:SS - Set current time\r\n\
set date DD:MM:YY - Set current date\r\n\
schedule on HH:MM:SS - Set device ON time\r\n\
schedule off HH:MM:SS - Set device OFF time\r\n\
schedule date DD:MM:YY - Set schedule date\r\n\
enable schedule - Enable scheduling\r\n\
disable schedule - Disable scheduling\r\n\
status - Show current status\r\n\
help - Show this help\r\n\
=============================\r\n";

/// Keyword prefixes, longest-first within each shared first word
const TABLE: [(&str, Keyword); 9] = [
    ("set time", Keyword::SetTime),
    ("set date", Keyword::SetDate),
    ("schedule on", Keyword::ScheduleOn),
    ("schedule off", Keyword::ScheduleOff),
    ("schedule date", Keyword::ScheduleDate),
    ("enable schedule", Keyword::EnableSchedule),
    ("disable schedule", Keyword::DisableSchedule),
    ("status", Keyword::Status),
    ("help", Keyword::Help),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    SetTime,
    SetDate,
    ScheduleOn,
    ScheduleOff,
    ScheduleDate,
    EnableSchedule,
    DisableSchedule,
    Status,
    Help,
}

impl Command {
    /// Tokenize a complete line
    ///
    /// Leading spaces are skipped; matching is case-sensitive.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start_matches(' ');
        if line.trim().is_empty() {
            return Err(CommandError::Empty);
        }

        let (keyword, rest) = match_keyword(line).ok_or(CommandError::Unknown)?;

        match keyword {
            Keyword::SetTime => parse_hms(rest).map(Command::SetTime),
            Keyword::SetDate => parse_dmy(rest).map(Command::SetDate),
            Keyword::ScheduleOn => parse_hms(rest).map(Command::ScheduleOn),
            Keyword::ScheduleOff => parse_hms(rest).map(Command::ScheduleOff),
            Keyword::ScheduleDate => parse_dmy(rest).map(Command::ScheduleDate),
            Keyword::EnableSchedule => Ok(Command::EnableSchedule),
            Keyword::DisableSchedule => Ok(Command::DisableSchedule),
            Keyword::Status => Ok(Command::Status),
            Keyword::Help => Ok(Command::Help),
        }
    }

    /// Check if executing this command changes clock or schedule state
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::Status | Command::Help)
    }
}

/// Find the table entry the line starts with
///
/// The keyword must end at the end of the line or at a space, so that
/// `schedule onion` is not taken for `schedule on`.
fn match_keyword(line: &str) -> Option<(Keyword, &str)> {
    TABLE.iter().find_map(|(prefix, keyword)| {
        let rest = line.strip_prefix(prefix)?;
        if rest.is_empty() || rest.starts_with(' ') {
            Some((*keyword, rest))
        } else {
            None
        }
    })
}

/// Split an argument string into exactly three unsigned integers
///
/// Separators are `:` and spaces, in any combination.
fn parse_triple(args: &str) -> Option<[u16; 3]> {
    let mut values = [0u16; 3];
    let mut tokens = args.split([':', ' ']).filter(|t| !t.is_empty());

    for value in values.iter_mut() {
        let token = tokens.next()?;
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *value = token.parse().ok()?;
    }

    if tokens.next().is_some() {
        return None;
    }
    Some(values)
}

fn parse_hms(args: &str) -> Result<Hms, CommandError> {
    let invalid = CommandError::InvalidArguments(ArgumentKind::Time);
    let [h, m, s] = parse_triple(args).ok_or(invalid)?;
    Ok(Hms {
        hours: u8::try_from(h).map_err(|_| invalid)?,
        minutes: u8::try_from(m).map_err(|_| invalid)?,
        seconds: u8::try_from(s).map_err(|_| invalid)?,
    })
}

fn parse_dmy(args: &str) -> Result<Dmy, CommandError> {
    let invalid = CommandError::InvalidArguments(ArgumentKind::Date);
    let [d, m, y] = parse_triple(args).ok_or(invalid)?;
    Ok(Dmy {
        day: u8::try_from(d).map_err(|_| invalid)?,
        month: u8::try_from(m).map_err(|_| invalid)?,
        year: y,
    })
}
