#![allow(dead_code)]

use cashflow_core::config::ProjectionConfig;
use cashflow_core::sources::{BankBalance, IncomeItem, SourceSnapshot, VendorObligation};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

/// Fixed projection start used across the integration tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

/// Date `offset` days after [`today`].
pub fn day(offset: i64) -> NaiveDate {
    today() + Duration::days(offset)
}

pub fn money(value: i64) -> Decimal {
    Decimal::from(value)
}

pub fn snapshot_with_balance(balance: i64) -> SourceSnapshot {
    SourceSnapshot::new(BankBalance::uniform(money(balance)))
}

/// Balance 10,000; a 9,000 bill on day 5 and 15,000 of income on day 6.
pub fn dip_then_recovery() -> SourceSnapshot {
    let mut snapshot = snapshot_with_balance(10_000);
    snapshot
        .vendors
        .push(VendorObligation::new(money(9_000), day(5)));
    snapshot.incomes.push(IncomeItem::new(money(15_000), day(6)));
    snapshot
}

pub fn config(reserve: i64, horizon_days: u32) -> ProjectionConfig {
    ProjectionConfig::default()
        .with_reserve(money(reserve))
        .with_horizon(horizon_days)
}
