use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sources::{PayoutStatus, SourceType};

/// Direction of a cash movement as seen by the bank account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Inflow,
    Outflow,
    CreditPayment,
}

/// Settlement details carried by marketplace payout events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementMeta {
    pub status: PayoutStatus,
    /// Date shown to the user as the payout date.
    pub availability_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_end: Option<NaiveDate>,
}

/// One future movement of money, normalized from any upstream source.
///
/// `date` is always the funds-impact date, already adjusted for settlement and
/// transfer timing. `amount` is signed: inflows are positive, outflows and credit
/// card payments negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CashFlowEvent {
    pub id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: EventKind,
    pub source_type: SourceType,
    pub source_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_meta: Option<SettlementMeta>,
}

impl CashFlowEvent {
    /// Builds an event from an unsigned magnitude; the sign follows `kind`.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        magnitude: Decimal,
        kind: EventKind,
        source_type: SourceType,
        source_id: Uuid,
    ) -> Self {
        let magnitude = magnitude.abs();
        let amount = match kind {
            EventKind::Inflow => magnitude,
            EventKind::Outflow | EventKind::CreditPayment => -magnitude,
        };
        Self {
            id: id.into(),
            date,
            amount,
            kind,
            source_type,
            source_id,
            label: None,
            settlement_meta: None,
        }
    }

    pub fn with_label(mut self, label: Option<&str>) -> Self {
        self.label = label.map(str::to_string);
        self
    }

    pub fn with_settlement(mut self, meta: SettlementMeta) -> Self {
        self.settlement_meta = Some(meta);
        self
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Date to display, which differs from `date` for forecasted payouts.
    pub fn display_date(&self) -> NaiveDate {
        self.settlement_meta
            .as_ref()
            .map(|meta| meta.availability_date)
            .unwrap_or(self.date)
    }
}
