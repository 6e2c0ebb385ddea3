//! Build script for timeswitch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates timeswitch.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    input: Option<InputSection>,
    tick: Option<TickSection>,
    clock: Option<ClockSection>,
    display: Option<DisplaySection>,
    console: Option<ConsoleSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputSection {
    debounce_samples: Option<u16>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TickSection {
    scan_every: Option<u16>,
    refresh_every: Option<u16>,
    wrap_at: Option<u16>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClockSection {
    ready_timeout_ms: Option<u32>,
    default_date: Option<String>,
    default_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    splash_ms: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConsoleSection {
    echo: Option<bool>,
    report_time: Option<bool>,
}

/// Validate timeswitch.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=timeswitch.toml");

    let config_path = Path::new("timeswitch.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: timeswitch.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds timeswitch.toml as its configuration.       ║\n\
            ║  Please create one in the timeswitch-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read timeswitch.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: ConfigFile = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid timeswitch.toml                                  ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_tick(&config, &mut errors);
    validate_clock(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in timeswitch.toml                        ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=timeswitch.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tick divisors must be non-zero and fit inside one second; the wrap point
/// is one second of 1 ms ticks
fn validate_tick(config: &ConfigFile, errors: &mut Vec<String>) {
    let Some(tick) = &config.tick else {
        return;
    };

    let scan = tick.scan_every.unwrap_or(10);
    let refresh = tick.refresh_every.unwrap_or(500);
    let wrap = tick.wrap_at.unwrap_or(1000);

    if scan == 0 || refresh == 0 || wrap == 0 {
        errors.push("[tick] values must be non-zero".to_string());
    }
    if wrap != 1000 {
        errors.push(format!(
            "[tick] wrap_at must be 1000 (one second of 1 ms ticks), got {}",
            wrap
        ));
    }
    if scan > wrap || refresh > wrap {
        errors.push("[tick] scan_every and refresh_every must be <= wrap_at".to_string());
    }
}

/// Seed date and time must be real calendar values
fn validate_clock(config: &ConfigFile, errors: &mut Vec<String>) {
    let Some(clock) = &config.clock else {
        return;
    };

    if let Some(date) = &clock.default_date {
        match split_fields(date, '/') {
            Some([day, month, year]) if valid_date(day, month, year) => {}
            _ => errors.push(format!("[clock] default_date '{}' is not DD/MM/YYYY", date)),
        }
    }

    if let Some(time) = &clock.default_time {
        match split_fields(time, ':') {
            Some([h, m, s]) if h < 24 && m < 60 && s < 60 => {}
            _ => errors.push(format!("[clock] default_time '{}' is not HH:MM:SS", time)),
        }
    }
}

fn split_fields(text: &str, separator: char) -> Option<[u32; 3]> {
    let fields = text
        .split(separator)
        .map(|field| field.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    fields.try_into().ok()
}

fn valid_date(day: u32, month: u32, year: u32) -> bool {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return false,
    };
    (1970..=2105).contains(&year) && (1..=days).contains(&day)
}
