//! Configuration type definitions
//!
//! Every field has a default matching the stock board, so a missing or
//! partial configuration file still yields a working clock.

use crate::calendar::{Date, Time};

/// Button scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Consecutive identical scans before a button state counts as stable
    pub debounce_samples: u16,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_samples: 20,
        }
    }
}

/// Base ticks in one second
pub const BEATS_PER_SECOND: u16 = 1000;

/// Heartbeat divisors, in beats of the 1 ms base tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickConfig {
    /// Button scan period
    pub scan_every: u16,
    /// Display refresh and schedule evaluation period
    pub refresh_every: u16,
    /// Counter wrap point; one wrap is one second of the RAM clock, so this
    /// must equal [`BEATS_PER_SECOND`]
    pub wrap_at: u16,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            scan_every: 10,
            refresh_every: 500,
            wrap_at: BEATS_PER_SECOND,
        }
    }
}

impl TickConfig {
    /// Check that every divisor is nonzero and fits inside one second
    pub fn is_valid(&self) -> bool {
        self.scan_every > 0
            && self.refresh_every > 0
            && self.wrap_at == BEATS_PER_SECOND
            && self.scan_every <= self.wrap_at
            && self.refresh_every <= self.wrap_at
    }
}

/// Real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcConfig {
    /// Longest wait for the low-speed oscillator at boot
    pub ready_timeout_ms: u32,
    /// Date seeded into a fresh backup domain
    pub default_date: Date,
    /// Time seeded into a fresh backup domain
    pub default_time: Time,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            ready_timeout_ms: 1000,
            default_date: Date::clamped(1, 1, 2024),
            default_time: Time::clamped(12, 0, 0),
        }
    }
}

/// Character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// How long the splash screen stays up at boot
    pub splash_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { splash_ms: 2000 }
    }
}

/// Serial console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    /// Echo received characters back to the terminal
    pub echo: bool,
    /// Print the date and time on every display refresh
    pub report_time: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            echo: true,
            report_time: false,
        }
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub input: InputConfig,
    pub tick: TickConfig,
    pub clock: RtcConfig,
    pub display: DisplayConfig,
    pub console: ConsoleConfig,
}
