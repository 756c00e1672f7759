use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A marketplace settlement paid out to the seller's bank account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketplacePayout {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<String>,
    #[serde(default)]
    pub payout_date: Option<NaiveDate>,
    pub total_amount: Decimal,
    pub status: PayoutStatus,
    #[serde(default)]
    pub settlement_start: Option<NaiveDate>,
    #[serde(default)]
    pub settlement_end: Option<NaiveDate>,
}

impl MarketplacePayout {
    pub fn new(total_amount: Decimal, status: PayoutStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            marketplace: None,
            payout_date: None,
            total_amount,
            status,
            settlement_start: None,
            settlement_end: None,
        }
    }

    pub fn with_payout_date(mut self, date: NaiveDate) -> Self {
        self.payout_date = Some(date);
        self
    }

    pub fn with_settlement(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.settlement_start = start;
        self.settlement_end = end;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    /// Settlement period closed and the payout amount is final.
    Confirmed,
    /// Settlement period still open and accumulating sales.
    Estimated,
    /// Model-generated prediction of a future settlement.
    Forecasted,
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PayoutStatus::Confirmed => "confirmed",
            PayoutStatus::Estimated => "estimated",
            PayoutStatus::Forecasted => "forecasted",
        };
        f.write_str(label)
    }
}
