//! Business-day iteration
//!
//! Mon–Fri from the local calendar, inclusive on both ends. No holiday
//! awareness: days the market was closed simply come back with no data
//! upstream and are skipped there.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// All business days in `[start, end]`, ascending
///
/// Empty when `start > end`.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        if is_business_day(day) {
            days.push(day);
        }
        day = day + Duration::days(1);
    }
    days
}

/// Is this a weekday?
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_skips_weekends() {
        // 2025-04-04 is a Friday, 2025-04-07 a Monday
        let days = business_days(date(2025, 4, 3), date(2025, 4, 8));
        assert_eq!(
            days,
            vec![
                date(2025, 4, 3),
                date(2025, 4, 4),
                date(2025, 4, 7),
                date(2025, 4, 8),
            ]
        );
    }

    #[test]
    fn test_inclusive_endpoints() {
        let days = business_days(date(2025, 4, 7), date(2025, 4, 7));
        assert_eq!(days, vec![date(2025, 4, 7)]);
    }

    #[test]
    fn test_weekend_only_range_is_empty() {
        let days = business_days(date(2025, 4, 5), date(2025, 4, 6));
        assert!(days.is_empty());
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let days = business_days(date(2025, 4, 8), date(2025, 4, 7));
        assert!(days.is_empty());
    }
}
