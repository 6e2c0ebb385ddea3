//! Calendar arithmetic
//!
//! Wall-clock values are stored as seconds since 1970-01-01 00:00:00 in a
//! `u32`, which covers every instant up to the end of 2105. Conversion is
//! exact in both directions for all valid inputs.

/// First representable year
pub const EPOCH_YEAR: u16 = 1970;

/// Last representable year
pub const MAX_YEAR: u16 = 2105;

/// Seconds in a day
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Day of the week for the epoch (1970-01-01 was a Thursday)
const EPOCH_WEEKDAY_OFFSET: u32 = 4;

/// Days before the first of each month in a common year
const CUMULATIVE_DAYS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Check for a Gregorian leap year
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month
///
/// Returns 0 for a month outside 1..=12.
pub fn days_in_month(month: u8, year: u16) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn days_in_year(year: u16) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Expand a two-digit year typed on the console
///
/// Values below 100 are offsets from 2000; anything else is a full year.
pub fn expand_year(year: u16) -> u16 {
    if year < 100 {
        2000 + year
    } else {
        year
    }
}

/// Day of the week, Monday = 1 through Sunday = 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// Weekday for a count of days since the epoch
    pub fn from_days(days: u32) -> Self {
        match (days + EPOCH_WEEKDAY_OFFSET) % 7 {
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    /// ISO number, 1..=7
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Editable time-of-day field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    /// Field under a menu cursor position (0..=2)
    pub fn from_cursor(cursor: u8) -> Self {
        match cursor {
            0 => TimeField::Hours,
            1 => TimeField::Minutes,
            _ => TimeField::Seconds,
        }
    }
}

/// Time of day
///
/// Always in range: hours 0..=23, minutes and seconds 0..=59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Time {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl Time {
    /// 00:00:00
    pub const MIDNIGHT: Time = Time {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Create a time, rejecting out-of-range fields
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Create a time, saturating each field at its maximum
    pub fn clamped(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self {
            hours: hours.min(23),
            minutes: minutes.min(59),
            seconds: seconds.min(59),
        }
    }

    /// Create a time from seconds since midnight (taken modulo one day)
    pub fn from_seconds_of_day(secs: u32) -> Self {
        let secs = secs % SECONDS_PER_DAY;
        Self {
            hours: (secs / 3600) as u8,
            minutes: (secs % 3600 / 60) as u8,
            seconds: (secs % 60) as u8,
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Seconds since midnight
    pub fn seconds_of_day(&self) -> u32 {
        self.hours as u32 * 3600 + self.minutes as u32 * 60 + self.seconds as u32
    }

    /// Step one field up or down, wrapping within the field
    ///
    /// No carry into the neighbouring field: 59 seconds stepped up becomes 0
    /// and the minutes stay as they were.
    pub fn step_field(&mut self, field: TimeField, up: bool) {
        fn step(value: u8, modulus: u8, up: bool) -> u8 {
            if up {
                (value + 1) % modulus
            } else {
                (value + modulus - 1) % modulus
            }
        }

        match field {
            TimeField::Hours => self.hours = step(self.hours, 24, up),
            TimeField::Minutes => self.minutes = step(self.minutes, 60, up),
            TimeField::Seconds => self.seconds = step(self.seconds, 60, up),
        }
    }
}

/// Calendar date
///
/// Always valid: the day exists in its month, the year is within
/// [`EPOCH_YEAR`]..=[`MAX_YEAR`], and the weekday matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    day: u8,
    month: u8,
    year: u16,
    weekday: Weekday,
}

impl Date {
    /// 1970-01-01
    pub const EPOCH: Date = Date {
        day: 1,
        month: 1,
        year: EPOCH_YEAR,
        weekday: Weekday::Thursday,
    };

    /// Create a date, rejecting impossible days and years out of range
    pub fn new(day: u8, month: u8, year: u16) -> Option<Self> {
        if !(EPOCH_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        if day == 0 || day > days_in_month(month, year) {
            return None;
        }
        Some(Self::with_weekday(day, month, year))
    }

    /// Create a date, pulling every field into range
    ///
    /// The month is clamped first, then the year, then the day against the
    /// length of the resulting month.
    pub fn clamped(day: u8, month: u8, year: u16) -> Self {
        let month = month.clamp(1, 12);
        let year = year.clamp(EPOCH_YEAR, MAX_YEAR);
        let day = day.clamp(1, days_in_month(month, year));
        Self::with_weekday(day, month, year)
    }

    fn with_weekday(day: u8, month: u8, year: u16) -> Self {
        let mut date = Self {
            day,
            month,
            year,
            weekday: Weekday::Thursday,
        };
        date.weekday = Weekday::from_days(date.days_since_epoch());
        date
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Whole days from the epoch to the start of this date
    pub fn days_since_epoch(&self) -> u32 {
        let mut days: u32 = (EPOCH_YEAR..self.year).map(days_in_year).sum();

        days += CUMULATIVE_DAYS[(self.month - 1) as usize] as u32;
        if self.month > 2 && is_leap_year(self.year) {
            days += 1;
        }

        days + (self.day as u32 - 1)
    }

    /// Date for a count of days since the epoch
    ///
    /// Counts past the end of [`MAX_YEAR`] saturate at its last day.
    pub fn from_days_since_epoch(days: u32) -> Self {
        let mut remaining = days;
        let mut year = EPOCH_YEAR;

        while remaining >= days_in_year(year) && year < MAX_YEAR {
            remaining -= days_in_year(year);
            year += 1;
        }
        let remaining = remaining.min(days_in_year(year) - 1);

        let mut month = 1;
        let mut day_of_year = remaining;
        while month < 12 {
            let len = days_in_month(month, year) as u32;
            if day_of_year < len {
                break;
            }
            day_of_year -= len;
            month += 1;
        }

        Self::with_weekday(day_of_year as u8 + 1, month, year)
    }

    /// Check whether two dates name the same calendar day
    pub fn same_day(&self, other: &Date) -> bool {
        self.day == other.day && self.month == other.month && self.year == other.year
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::EPOCH
    }
}

/// `HH:MM:SS`
impl core::fmt::Display for Time {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// `DD/MM/YYYY`
impl core::fmt::Display for Date {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// Date and time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
}

impl DateTime {
    pub fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }
}

/// Convert a date and time to seconds since the epoch
pub fn to_epoch_seconds(date: &Date, time: &Time) -> u32 {
    date.days_since_epoch() * SECONDS_PER_DAY + time.seconds_of_day()
}

/// Convert seconds since the epoch to a date and time
pub fn from_epoch_seconds(secs: u32) -> DateTime {
    DateTime {
        date: Date::from_days_since_epoch(secs / SECONDS_PER_DAY),
        time: Time::from_seconds_of_day(secs),
    }
}
