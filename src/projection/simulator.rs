//! Day-by-day running balance over a projection window.
//!
//! This is the only place the running balance is computed; the chart series and
//! the safe-spending analysis both read its output.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::event::CashFlowEvent;
use super::timeline::Timeline;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalancePoint {
    pub date: NaiveDate,
    pub starting_balance: Decimal,
    pub net_change: Decimal,
    pub ending_balance: Decimal,
    #[serde(default)]
    pub contributing_events: Vec<CashFlowEvent>,
}

/// Produces one point per day of the timeline's window, starting from
/// `starting_balance`. Days without events carry the balance forward unchanged.
pub fn simulate(starting_balance: Decimal, timeline: &Timeline) -> Vec<DailyBalancePoint> {
    let window = timeline.window();
    let mut series = Vec::with_capacity(window.horizon_days() as usize);
    let mut balance = starting_balance;

    for date in window.days() {
        let events = timeline.events_on(date);
        let net_change = timeline.net_change_on(date);
        let ending_balance = balance + net_change;
        series.push(DailyBalancePoint {
            date,
            starting_balance: balance,
            net_change,
            ending_balance,
            contributing_events: events.to_vec(),
        });
        balance = ending_balance;
    }

    series
}
