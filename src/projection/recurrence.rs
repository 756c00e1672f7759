//! Expansion of recurring rules into concrete occurrence dates.
//!
//! Monthly rules keep the day of month of `start_date`; in months without that day
//! the occurrence falls on the month's last day, and the following month returns to
//! the anchor day (31 Jan, 28 Feb, 31 Mar, ...). Yearly rules anchored on 29 February
//! fall on 28 February in common years.

use chrono::{Datelike, NaiveDate};

use crate::sources::{Frequency, RecurringRule};
use crate::utils::dates::{add_days, is_weekend, shift_months, shift_years};

/// Returns the occurrences of `rule` inside `[range_start, range_end]`.
///
/// The iterator holds no state beyond its own cursor; calling `expand` again with the
/// same arguments yields the same dates.
pub fn expand(rule: &RecurringRule, range_start: NaiveDate, range_end: NaiveDate) -> Occurrences<'_> {
    let lower = range_start.max(rule.start_date);
    let upper = match rule.end_date {
        Some(end) => range_end.min(end),
        None => range_end,
    };
    let cursor = if lower > upper {
        Cursor::Exhausted
    } else {
        first_cursor(rule, lower)
    };
    Occurrences {
        rule,
        lower,
        upper,
        cursor,
    }
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    /// Index into the rule's sequence of occurrences, counted from `start_date`.
    Step(i64),
    /// Next calendar day to test for weekday-only rules.
    Day(NaiveDate),
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RecurringRule,
    lower: NaiveDate,
    upper: NaiveDate,
    cursor: Cursor,
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        loop {
            let candidate = match self.cursor {
                Cursor::Exhausted => return None,
                Cursor::Step(index) => {
                    let date = occurrence_at(self.rule, index);
                    self.cursor = Cursor::Step(index + 1);
                    date
                }
                Cursor::Day(day) => {
                    self.cursor = Cursor::Day(add_days(day, 1));
                    if is_weekend(day) {
                        if day >= self.upper {
                            self.cursor = Cursor::Exhausted;
                            return None;
                        }
                        continue;
                    }
                    Some(day)
                }
            };

            let Some(date) = candidate else {
                self.cursor = Cursor::Exhausted;
                return None;
            };
            if date > self.upper {
                self.cursor = Cursor::Exhausted;
                return None;
            }
            if date < self.lower || self.rule.is_skipped(date) {
                continue;
            }
            return Some(date);
        }
    }
}

/// Date of the `index`-th occurrence for interval-based frequencies.
fn occurrence_at(rule: &RecurringRule, index: i64) -> Option<NaiveDate> {
    let start = rule.start_date;
    match rule.frequency {
        Frequency::Daily => Some(add_days(start, index)),
        Frequency::Weekly => Some(add_days(start, index * 7)),
        Frequency::Biweekly => Some(add_days(start, index * 14)),
        Frequency::Monthly => {
            let months = i32::try_from(index).ok()?;
            shift_months(start, months, start.day())
        }
        Frequency::Yearly => {
            let years = i32::try_from(index).ok()?;
            shift_years(start, years, start.month(), start.day())
        }
        Frequency::Weekdays => None,
    }
}

/// Skips straight to the first occurrence that can fall on or after `lower`.
fn first_cursor(rule: &RecurringRule, lower: NaiveDate) -> Cursor {
    let start = rule.start_date;
    let elapsed_days = (lower - start).num_days().max(0);
    match rule.frequency {
        Frequency::Weekdays => Cursor::Day(lower),
        Frequency::Daily => Cursor::Step(elapsed_days),
        Frequency::Weekly => Cursor::Step(ceil_div(elapsed_days, 7)),
        Frequency::Biweekly => Cursor::Step(ceil_div(elapsed_days, 14)),
        Frequency::Monthly => {
            let months = month_index(lower) - month_index(start);
            Cursor::Step((months - 1).max(0))
        }
        Frequency::Yearly => {
            let years = i64::from(lower.year() - start.year());
            Cursor::Step((years - 1).max(0))
        }
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}
