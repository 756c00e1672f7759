use cashflow_core::projection::recurrence::expand;
use cashflow_core::sources::{FlowDirection, Frequency, RecurringRule};
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rule(frequency: Frequency, start: NaiveDate) -> RecurringRule {
    RecurringRule::new(Decimal::from(25), frequency, start, FlowDirection::Expense)
}

#[test]
fn daily_rule_covers_every_day_in_range() {
    let daily = rule(Frequency::Daily, date(2025, 1, 1));
    let dates: Vec<_> = expand(&daily, date(2025, 3, 1), date(2025, 3, 5)).collect();
    assert_eq!(dates.len(), 5);
    assert_eq!(dates[0], date(2025, 3, 1));
    assert_eq!(dates[4], date(2025, 3, 5));
}

#[test]
fn weekly_and_biweekly_keep_their_weekday() {
    let start = date(2025, 1, 6);
    let weekly: Vec<_> = expand(&rule(Frequency::Weekly, start), date(2025, 1, 7), date(2025, 2, 3)).collect();
    assert_eq!(
        weekly,
        vec![date(2025, 1, 13), date(2025, 1, 20), date(2025, 1, 27), date(2025, 2, 3)]
    );

    let biweekly: Vec<_> =
        expand(&rule(Frequency::Biweekly, start), date(2025, 1, 1), date(2025, 2, 28)).collect();
    assert_eq!(
        biweekly,
        vec![date(2025, 1, 6), date(2025, 1, 20), date(2025, 2, 3), date(2025, 2, 17)]
    );
    assert!(biweekly.iter().all(|d| d.weekday() == Weekday::Mon));
}

#[test]
fn monthly_rule_on_the_31st_clamps_then_returns() {
    let monthly = rule(Frequency::Monthly, date(2025, 1, 31));
    let dates: Vec<_> = expand(&monthly, date(2025, 1, 1), date(2025, 5, 31)).collect();
    assert_eq!(
        dates,
        vec![
            date(2025, 1, 31),
            date(2025, 2, 28),
            date(2025, 3, 31),
            date(2025, 4, 30),
            date(2025, 5, 31)
        ]
    );
}

#[test]
fn yearly_leap_day_falls_back_to_february_28() {
    let yearly = rule(Frequency::Yearly, date(2024, 2, 29));
    let dates: Vec<_> = expand(&yearly, date(2024, 1, 1), date(2028, 12, 31)).collect();
    assert_eq!(
        dates,
        vec![
            date(2024, 2, 29),
            date(2025, 2, 28),
            date(2026, 2, 28),
            date(2027, 2, 28),
            date(2028, 2, 29)
        ]
    );
}

#[test]
fn weekdays_rule_skips_weekends() {
    let weekdays = rule(Frequency::Weekdays, date(2025, 6, 1));
    let dates: Vec<_> = expand(&weekdays, date(2025, 6, 5), date(2025, 6, 11)).collect();
    assert_eq!(
        dates,
        vec![
            date(2025, 6, 5),
            date(2025, 6, 6),
            date(2025, 6, 9),
            date(2025, 6, 10),
            date(2025, 6, 11)
        ]
    );
}

#[test]
fn rule_bounds_and_skip_dates_are_honoured() {
    let mut weekly = rule(Frequency::Weekly, date(2025, 3, 3)).ending_on(date(2025, 3, 24));
    weekly.skip_dates.push(date(2025, 3, 17));
    let dates: Vec<_> = expand(&weekly, date(2025, 1, 1), date(2025, 12, 31)).collect();
    assert_eq!(dates, vec![date(2025, 3, 3), date(2025, 3, 10), date(2025, 3, 24)]);
}

#[test]
fn range_outside_rule_bounds_is_empty() {
    let ended = rule(Frequency::Daily, date(2025, 1, 1)).ending_on(date(2025, 1, 31));
    assert_eq!(expand(&ended, date(2025, 2, 1), date(2025, 2, 28)).count(), 0);

    let future = rule(Frequency::Monthly, date(2026, 1, 1));
    assert_eq!(expand(&future, date(2025, 1, 1), date(2025, 12, 31)).count(), 0);
}

#[test]
fn expansion_is_restartable() {
    let monthly = rule(Frequency::Monthly, date(2023, 8, 30));
    let first: Vec<_> = expand(&monthly, date(2025, 1, 1), date(2025, 12, 31)).collect();
    let second: Vec<_> = expand(&monthly, date(2025, 1, 1), date(2025, 12, 31)).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 12);
    assert_eq!(first[1], date(2025, 2, 28));
}
