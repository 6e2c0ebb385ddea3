//! Minimal TOML reader for the clock configuration
//!
//! Handles only the subset the configuration file uses. It does NOT support
//! the full TOML spec.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs with integer, boolean and basic string values
//! - Comments (`# ...`), whole-line or trailing
//!
//! Dates are written as `"DD/MM/YYYY"` and times as `"HH:MM:SS"`.

use super::types::ClockConfig;
use crate::calendar::{Date, Time};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header (1-based line number)
    InvalidSection(u16),
    /// Key not valid in its section
    UnknownKey(u16),
    /// Value of the wrong type or out of range
    InvalidValue(u16),
    /// Line is neither a header nor `key = value`
    Syntax(u16),
    /// Tick divisors are zero, exceed the wrap point, or the wrap point is
    /// not one second
    InvalidTick,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Input,
    Tick,
    Clock,
    Display,
    Console,
}

/// Parse TOML text into a [`ClockConfig`]
///
/// Missing sections and keys keep their defaults.
pub fn parse_config(input: &str) -> Result<ClockConfig, ParseError> {
    let mut config = ClockConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = (index + 1).min(u16::MAX as usize) as u16;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection(line_no))?;
            section = parse_section_header(name).ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Syntax(line_no))?;
        apply_value(section, key, value, &mut config, line_no)?;
    }

    if !config.tick.is_valid() {
        return Err(ParseError::InvalidTick);
    }

    Ok(config)
}

fn parse_section_header(name: &str) -> Option<Section> {
    match name.trim() {
        "input" => Some(Section::Input),
        "tick" => Some(Section::Tick),
        "clock" => Some(Section::Clock),
        "display" => Some(Section::Display),
        "console" => Some(Section::Console),
        _ => None,
    }
}

/// Drop a trailing comment, leaving `#` inside quotes alone
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ClockConfig,
    line_no: u16,
) -> Result<(), ParseError> {
    let invalid = ParseError::InvalidValue(line_no);

    match (section, key) {
        (Section::Input, "debounce_samples") => {
            config.input.debounce_samples = parse_int(value).ok_or(invalid)?;
        }
        (Section::Tick, "scan_every") => {
            config.tick.scan_every = parse_int(value).ok_or(invalid)?;
        }
        (Section::Tick, "refresh_every") => {
            config.tick.refresh_every = parse_int(value).ok_or(invalid)?;
        }
        (Section::Tick, "wrap_at") => {
            config.tick.wrap_at = parse_int(value).ok_or(invalid)?;
        }
        (Section::Clock, "ready_timeout_ms") => {
            config.clock.ready_timeout_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Clock, "default_date") => {
            config.clock.default_date = parse_string(value).and_then(parse_date).ok_or(invalid)?;
        }
        (Section::Clock, "default_time") => {
            config.clock.default_time = parse_string(value).and_then(parse_time).ok_or(invalid)?;
        }
        (Section::Display, "splash_ms") => {
            config.display.splash_ms = parse_int(value).ok_or(invalid)?;
        }
        (Section::Console, "echo") => {
            config.console.echo = parse_bool(value).ok_or(invalid)?;
        }
        (Section::Console, "report_time") => {
            config.console.report_time = parse_bool(value).ok_or(invalid)?;
        }
        _ => return Err(ParseError::UnknownKey(line_no)),
    }

    Ok(())
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Option<T> {
    // TOML allows underscores as digit separators
    let mut digits = heapless::String::<16>::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).ok()?;
    }
    digits.parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_string(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

fn split3(value: &str, sep: char) -> Option<[&str; 3]> {
    let mut parts = value.split(sep);
    let fields = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    Some(fields)
}

fn parse_date(value: &str) -> Option<Date> {
    let [d, m, y] = split3(value, '/')?;
    Date::new(d.parse().ok()?, m.parse().ok()?, y.parse().ok()?)
}

fn parse_time(value: &str) -> Option<Time> {
    let [h, m, s] = split3(value, ':')?;
    Time::new(h.parse().ok()?, m.parse().ok()?, s.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Stock Blue Pill board
[input]
debounce_samples = 25

[tick]
scan_every = 5
refresh_every = 250   # twice as fast
wrap_at = 1_000

[clock]
ready_timeout_ms = 1500
default_date = "29/02/2028"
default_time = "07:30:00"

[console]
echo = false
report_time = true
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.input.debounce_samples, 25);
        assert_eq!(config.tick.scan_every, 5);
        assert_eq!(config.tick.refresh_every, 250);
        assert_eq!(config.tick.wrap_at, 1000);
        assert_eq!(config.clock.ready_timeout_ms, 1500);
        assert_eq!(config.clock.default_date, Date::new(29, 2, 2028).unwrap());
        assert_eq!(config.clock.default_time, Time::new(7, 30, 0).unwrap());
        assert!(!config.console.echo);
        assert!(config.console.report_time);
        // Section absent from the file
        assert_eq!(config.display.splash_ms, 2000);
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), ClockConfig::default());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[stepper]\n"),
            Err(ParseError::InvalidSection(1))
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[input]\nbounce = 3\n"),
            Err(ParseError::UnknownKey(2))
        );
    }

    #[test]
    fn test_key_outside_section() {
        assert_eq!(
            parse_config("echo = true\n"),
            Err(ParseError::UnknownKey(1))
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[console]\necho = yes\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[clock]\ndefault_date = \"30/02/2024\"\n"),
            Err(ParseError::InvalidValue(2))
        );
        assert_eq!(
            parse_config("[tick]\nscan_every = -1\n"),
            Err(ParseError::InvalidValue(2))
        );
    }

    #[test]
    fn test_syntax_error() {
        assert_eq!(parse_config("[tick]\nwrap_at\n"), Err(ParseError::Syntax(2)));
    }

    #[test]
    fn test_inconsistent_tick() {
        assert_eq!(
            parse_config("[tick]\nrefresh_every = 2000\n"),
            Err(ParseError::InvalidTick)
        );
        assert_eq!(
            parse_config("[tick]\nscan_every = 0\n"),
            Err(ParseError::InvalidTick)
        );
    }

    #[test]
    fn test_wrap_must_be_one_second() {
        assert_eq!(
            parse_config("[tick]\nwrap_at = 500\n"),
            Err(ParseError::InvalidTick)
        );
        assert_eq!(
            parse_config("[tick]\nwrap_at = 2_000\n"),
            Err(ParseError::InvalidTick)
        );
    }
}
