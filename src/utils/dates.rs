//! Calendar arithmetic shared by the recurrence expander and the normalizer.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Number of days in the given month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Builds a date in the given month, clamping `day` to the last day of that month.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Moves `months` calendar months away from `from`, keeping `anchor_day` when the
/// target month has it and falling back to the month's last day otherwise.
pub fn shift_months(from: NaiveDate, months: i32, anchor_day: u32) -> Option<NaiveDate> {
    let index = from.year() * 12 + from.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    clamped_date(year, month, anchor_day)
}

/// Adds one or more months to `from`, anchored on its own day of month.
pub fn add_months(from: NaiveDate, months: i32) -> Option<NaiveDate> {
    shift_months(from, months, from.day())
}

/// Moves `years` away from `from`; 29 February becomes 28 February in common years.
pub fn shift_years(from: NaiveDate, years: i32, month: u32, anchor_day: u32) -> Option<NaiveDate> {
    clamped_date(from.year() + years, month, anchor_day)
}

pub fn add_days(from: NaiveDate, days: i64) -> NaiveDate {
    from.checked_add_signed(Duration::days(days)).unwrap_or(from)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
