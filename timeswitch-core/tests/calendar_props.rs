use proptest::prelude::*;

use timeswitch_core::calendar::{
    from_epoch_seconds, is_leap_year, to_epoch_seconds, Date, Time, EPOCH_YEAR, MAX_YEAR,
    SECONDS_PER_DAY,
};

fn any_date() -> impl Strategy<Value = Date> {
    (EPOCH_YEAR..=MAX_YEAR, 1u8..=12, 1u8..=31)
        .prop_filter_map("day past end of month", |(y, m, d)| Date::new(d, m, y))
}

fn any_time() -> impl Strategy<Value = Time> {
    (0u8..24, 0u8..60, 0u8..60).prop_map(|(h, m, s)| Time::clamped(h, m, s))
}

proptest! {
    #[test]
    fn date_time_round_trip(date in any_date(), time in any_time()) {
        let dt = from_epoch_seconds(to_epoch_seconds(&date, &time));
        prop_assert_eq!(dt.date, date);
        prop_assert_eq!(dt.time, time);
    }

    #[test]
    fn seconds_round_trip(secs in 0u32..=4_291_747_199) {
        let dt = from_epoch_seconds(secs);
        prop_assert_eq!(to_epoch_seconds(&dt.date, &dt.time), secs);
    }

    #[test]
    fn next_day_is_one_day_later(date in any_date()) {
        prop_assume!(!(date.year() == MAX_YEAR && date.month() == 12 && date.day() == 31));
        let start = to_epoch_seconds(&date, &Time::MIDNIGHT);
        let next = from_epoch_seconds(start + SECONDS_PER_DAY);
        let weekday = date.weekday().number() % 7 + 1;
        prop_assert_eq!(next.date.weekday().number(), weekday);
    }

    #[test]
    fn clamped_dates_are_valid(d in any::<u8>(), m in any::<u8>(), y in any::<u16>()) {
        let date = Date::clamped(d, m, y);
        prop_assert!(Date::new(date.day(), date.month(), date.year()).is_some());
    }
}

#[test]
fn leap_year_rules() {
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(is_leap_year(2024));
    assert!(!is_leap_year(2023));
}
