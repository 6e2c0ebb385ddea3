//! Backup slot encoding of the schedule record
//!
//! ```text
//! slot 1  on.h  << 24 | on.m  << 16 | on.s  << 8 | date.day    (0 = daily)
//! slot 2  off.h << 24 | off.m << 16 | off.s << 8 | date.month
//! slot 3  date.year << 8 | 0x80 (record valid) | enabled
//! ```

use crate::calendar::{Date, Time};
use crate::schedule::Schedule;

/// Value of the sentinel slot once the domain has been initialized
pub const SENTINEL: u32 = 0x5A5A;

/// Marks slot 3 as holding a record, so an all-zero meta slot means "none"
const META_VALID: u32 = 0x80;
const META_ENABLED: u32 = 0x01;

/// Encoded schedule record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWords {
    pub on: u32,
    pub off: u32,
    pub meta: u32,
}

fn pack_time(time: &Time, low: u8) -> u32 {
    (time.hours() as u32) << 24
        | (time.minutes() as u32) << 16
        | (time.seconds() as u32) << 8
        | low as u32
}

fn unpack_time(word: u32) -> (Time, u8) {
    let time = Time::clamped((word >> 24) as u8, (word >> 16) as u8, (word >> 8) as u8);
    (time, word as u8)
}

/// Encode a schedule for the backup slots
pub fn encode(schedule: &Schedule) -> ScheduleWords {
    let (day, month, year) = match &schedule.date {
        Some(date) => (date.day(), date.month(), date.year()),
        None => (0, 0, 0),
    };

    ScheduleWords {
        on: pack_time(&schedule.on_time, day),
        off: pack_time(&schedule.off_time, month),
        meta: (year as u32) << 8 | META_VALID | schedule.enabled as u32,
    }
}

/// Decode a schedule from the backup slots
///
/// Returns `None` when no record has been written. A stored date that is not
/// a real calendar day decodes as a daily schedule.
pub fn decode(words: &ScheduleWords) -> Option<Schedule> {
    if words.meta == 0 {
        return None;
    }

    let (on_time, day) = unpack_time(words.on);
    let (off_time, month) = unpack_time(words.off);
    let year = (words.meta >> 8) as u16;

    let date = match day {
        0 => None,
        _ => Date::new(day, month, year),
    };

    Some(Schedule {
        enabled: words.meta & META_ENABLED != 0,
        on_time,
        off_time,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dated_record_layout() {
        let schedule = Schedule {
            enabled: true,
            on_time: Time::new(8, 30, 15).unwrap(),
            off_time: Time::new(18, 0, 5).unwrap(),
            date: Some(Date::new(24, 12, 2025).unwrap()),
        };
        let words = encode(&schedule);
        assert_eq!(words.on, 0x081E_0F18);
        assert_eq!(words.off, 0x1200_050C);
        assert_eq!(words.meta, 0x0007_E981);
        assert_eq!(decode(&words), Some(schedule));
    }

    #[test]
    fn test_daily_disabled_record() {
        let schedule = Schedule {
            enabled: false,
            on_time: Time::new(6, 0, 0).unwrap(),
            off_time: Time::new(7, 0, 0).unwrap(),
            date: None,
        };
        let words = encode(&schedule);
        assert_eq!(words.meta, META_VALID);
        assert_eq!(decode(&words), Some(schedule));
    }

    #[test]
    fn test_blank_slots_decode_to_none() {
        let words = ScheduleWords {
            on: 0,
            off: 0,
            meta: 0,
        };
        assert_eq!(decode(&words), None);
    }

    #[test]
    fn test_corrupt_date_is_daily() {
        let words = ScheduleWords {
            on: 0x0800_001F,  // day 31
            off: 0x1200_0002, // February
            meta: 0x0007_E881,
        };
        let schedule = decode(&words).unwrap();
        assert!(schedule.enabled);
        assert_eq!(schedule.date, None);
    }
}
