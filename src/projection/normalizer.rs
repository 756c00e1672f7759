//! Conversion of upstream records into [`CashFlowEvent`]s.
//!
//! Each source has its own timing rules. Records that cannot contribute to the
//! projection are reported as [`SkippedRecord`]s instead of failing the run.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::event::{CashFlowEvent, EventKind, SettlementMeta};
use super::recurrence;
use super::timeline::ProjectionWindow;
use crate::sources::{
    CreditCardAccount, FlowDirection, IncomeItem, IncomeStatus, MarketplacePayout,
    PayoutStatus, RecurringRule, SourceRecord, SourceSnapshot, SourceType, VendorObligation,
    VendorStatus,
};
use crate::utils::dates::{add_days, add_months};

pub const DEFAULT_ASSUMED_SETTLEMENT_DAYS: u32 = 14;
pub const DEFAULT_FORECAST_TRANSFER_LAG_DAYS: u32 = 1;

/// Days between a settlement period closing and its funds reaching the bank.
const SETTLEMENT_AVAILABILITY_DAYS: i64 = 1;

/// Timing assumptions for marketplace payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutTiming {
    /// Length assumed for an open settlement period with no known end.
    pub assumed_settlement_days: u32,
    /// Extra days between a forecasted payout date and the bank credit.
    pub forecast_transfer_lag_days: u32,
}

impl Default for PayoutTiming {
    fn default() -> Self {
        Self {
            assumed_settlement_days: DEFAULT_ASSUMED_SETTLEMENT_DAYS,
            forecast_transfer_lag_days: DEFAULT_FORECAST_TRANSFER_LAG_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Vendor obligation already paid or completed.
    AlreadyPaid,
    /// Vendor obligation partially paid; the remainder is tracked elsewhere.
    PartiallyPaid,
    /// Income item already received.
    Received,
    /// Recurring rule switched off.
    Inactive,
    /// Funds-impact date falls before the projection start.
    PastDated,
    ZeroAmount,
    /// Record has no usable date.
    MissingDate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::AlreadyPaid => "already paid",
            SkipReason::PartiallyPaid => "partially paid",
            SkipReason::Received => "already received",
            SkipReason::Inactive => "inactive",
            SkipReason::PastDated => "dated before today",
            SkipReason::ZeroAmount => "zero amount",
            SkipReason::MissingDate => "missing date",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    pub source_type: SourceType,
    pub source_id: Uuid,
    pub reason: SkipReason,
}

/// Events produced from a set of records, plus the records left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub events: Vec<CashFlowEvent>,
    pub skipped: Vec<SkippedRecord>,
}

impl Normalized {
    fn skip(&mut self, record: SourceRecord<'_>, reason: SkipReason) {
        let source_type = record.source_type();
        let source_id = record.source_id();
        match reason {
            SkipReason::MissingDate => {
                warn!(%source_type, %source_id, "record has no usable date, leaving it out");
            }
            _ => debug!(%source_type, %source_id, %reason, "record skipped"),
        }
        self.skipped.push(SkippedRecord {
            source_type,
            source_id,
            reason,
        });
    }

    fn extend(&mut self, other: Normalized) {
        self.events.extend(other.events);
        self.skipped.extend(other.skipped);
    }
}

/// Turns upstream records into funds-impact events for one projection window.
#[derive(Debug, Clone, Copy)]
pub struct EventNormalizer {
    window: ProjectionWindow,
    timing: PayoutTiming,
}

impl EventNormalizer {
    pub fn new(window: ProjectionWindow, timing: PayoutTiming) -> Self {
        Self { window, timing }
    }

    fn today(&self) -> NaiveDate {
        self.window.start_date()
    }

    pub fn normalize_snapshot(&self, snapshot: &SourceSnapshot) -> Normalized {
        let mut normalized = Normalized::default();
        for record in snapshot.records() {
            normalized.extend(self.normalize(record));
        }
        debug!(
            events = normalized.events.len(),
            skipped = normalized.skipped.len(),
            "snapshot normalized"
        );
        normalized
    }

    pub fn normalize(&self, record: SourceRecord<'_>) -> Normalized {
        let mut out = Normalized::default();
        match record {
            SourceRecord::Vendor(vendor) => self.vendor(record, vendor, &mut out),
            SourceRecord::Income(income) => self.income(record, income, &mut out),
            SourceRecord::Recurring(rule) => self.recurring(record, rule, &mut out),
            SourceRecord::CreditCard(card) => self.credit_card(record, card, &mut out),
            SourceRecord::MarketplacePayout(payout) => self.payout(record, payout, &mut out),
        }
        out
    }

    fn vendor(&self, record: SourceRecord<'_>, vendor: &VendorObligation, out: &mut Normalized) {
        if vendor.status.is_settled() {
            return out.skip(record, SkipReason::AlreadyPaid);
        }
        if vendor.status == VendorStatus::PartiallyPaid {
            return out.skip(record, SkipReason::PartiallyPaid);
        }

        if vendor.has_schedule() {
            let today = self.today();
            let before = out.events.len();
            for (index, line) in vendor.payment_schedule.iter().enumerate() {
                if line.date < today || line.amount.is_zero() {
                    debug!(vendor = %vendor.id, index, date = %line.date, "schedule line skipped");
                    continue;
                }
                let event = CashFlowEvent::new(
                    format!("vendor:{}:{}", vendor.id, index),
                    line.date,
                    line.amount,
                    EventKind::Outflow,
                    SourceType::Vendor,
                    vendor.id,
                )
                .with_label(vendor.name.as_deref());
                out.events.push(event);
            }
            if out.events.len() == before {
                out.skip(record, SkipReason::PastDated);
            }
            return;
        }

        let Some(due) = vendor.due_date else {
            return out.skip(record, SkipReason::MissingDate);
        };
        if let Some(reason) = self.reject(due, vendor.amount) {
            return out.skip(record, reason);
        }
        out.events.push(
            CashFlowEvent::new(
                format!("vendor:{}", vendor.id),
                due,
                vendor.amount,
                EventKind::Outflow,
                SourceType::Vendor,
                vendor.id,
            )
            .with_label(vendor.name.as_deref()),
        );
    }

    fn income(&self, record: SourceRecord<'_>, income: &IncomeItem, out: &mut Normalized) {
        if income.status == IncomeStatus::Received {
            return out.skip(record, SkipReason::Received);
        }
        let Some(expected) = income.payment_date else {
            return out.skip(record, SkipReason::MissingDate);
        };
        if let Some(reason) = self.reject(expected, income.amount) {
            return out.skip(record, reason);
        }
        out.events.push(
            CashFlowEvent::new(
                format!("income:{}", income.id),
                expected,
                income.amount,
                EventKind::Inflow,
                SourceType::Income,
                income.id,
            )
            .with_label(income.customer.as_deref()),
        );
    }

    fn recurring(&self, record: SourceRecord<'_>, rule: &RecurringRule, out: &mut Normalized) {
        if !rule.is_active {
            return out.skip(record, SkipReason::Inactive);
        }
        if rule.amount.is_zero() {
            return out.skip(record, SkipReason::ZeroAmount);
        }
        let kind = match rule.direction {
            FlowDirection::Income => EventKind::Inflow,
            FlowDirection::Expense => EventKind::Outflow,
        };
        let occurrences =
            recurrence::expand(rule, self.window.start_date(), self.window.last_day());
        for date in occurrences {
            out.events.push(
                CashFlowEvent::new(
                    format!("recurring:{}:{}", rule.id, date),
                    date,
                    rule.amount,
                    kind,
                    SourceType::Recurring,
                    rule.id,
                )
                .with_label(rule.name.as_deref()),
            );
        }
    }

    fn credit_card(&self, record: SourceRecord<'_>, card: &CreditCardAccount, out: &mut Normalized) {
        let Some(due) = card.payment_due_date else {
            return out.skip(record, SkipReason::MissingDate);
        };
        let today = self.today();
        let mut primary_reason = None;

        let payment = self.statement_payment(card);
        match self.reject(due, payment) {
            Some(reason) => primary_reason = Some(reason),
            None => out.events.push(
                CashFlowEvent::new(
                    format!("credit_card:{}:statement", card.id),
                    due,
                    payment,
                    EventKind::CreditPayment,
                    SourceType::CreditCard,
                    card.id,
                )
                .with_label(card.name.as_deref()),
            ),
        }

        if card.forecast_next_cycle {
            let next = card
                .projected_next_balance()
                .zip(add_months(due, 1))
                .filter(|(_, date)| *date >= today);
            if let Some((amount, date)) = next {
                out.events.push(
                    CashFlowEvent::new(
                        format!("credit_card:{}:next_cycle", card.id),
                        date,
                        amount,
                        EventKind::CreditPayment,
                        SourceType::CreditCard,
                        card.id,
                    )
                    .with_label(card.name.as_deref()),
                );
                return;
            }
        }

        if let Some(reason) = primary_reason {
            out.skip(record, reason);
        }
    }

    /// Amount leaving the bank for the current statement.
    fn statement_payment(&self, card: &CreditCardAccount) -> Decimal {
        if !card.pay_minimum_only {
            return card.statement_balance;
        }
        match card.minimum_payment {
            Some(minimum) => minimum.min(card.statement_balance),
            None => {
                warn!(card = %card.id, "minimum payment unknown, projecting full statement balance");
                card.statement_balance
            }
        }
    }

    fn payout(&self, record: SourceRecord<'_>, payout: &MarketplacePayout, out: &mut Normalized) {
        if payout.total_amount.is_zero() {
            return out.skip(record, SkipReason::ZeroAmount);
        }
        let today = self.today();

        // Confirmed and estimated payouts are money already earned; old ones land today.
        let (funds_date, display_date) = match payout.status {
            PayoutStatus::Confirmed => {
                let Some(closed) = payout.settlement_end.or(payout.payout_date) else {
                    return out.skip(record, SkipReason::MissingDate);
                };
                let funds = add_days(closed, SETTLEMENT_AVAILABILITY_DAYS).max(today);
                (funds, funds)
            }
            PayoutStatus::Estimated => {
                let Some(closes) = self.estimated_settlement_end(payout) else {
                    return out.skip(record, SkipReason::MissingDate);
                };
                let funds = add_days(closes, SETTLEMENT_AVAILABILITY_DAYS).max(today);
                (funds, funds)
            }
            PayoutStatus::Forecasted => {
                let Some(predicted) = payout.payout_date else {
                    return out.skip(record, SkipReason::MissingDate);
                };
                if predicted < today {
                    return out.skip(record, SkipReason::PastDated);
                }
                let lag = i64::from(self.timing.forecast_transfer_lag_days);
                (add_days(predicted, lag), predicted)
            }
        };

        let kind = if payout.total_amount > Decimal::ZERO {
            EventKind::Inflow
        } else {
            EventKind::Outflow
        };
        let meta = SettlementMeta {
            status: payout.status,
            availability_date: display_date,
            settlement_start: payout.settlement_start,
            settlement_end: payout.settlement_end,
        };
        debug!(payout = %payout.id, status = %payout.status, date = %funds_date, "payout normalized");
        out.events.push(
            CashFlowEvent::new(
                format!("marketplace_payout:{}", payout.id),
                funds_date,
                payout.total_amount,
                kind,
                SourceType::MarketplacePayout,
                payout.id,
            )
            .with_label(payout.marketplace.as_deref())
            .with_settlement(meta),
        );
    }

    fn estimated_settlement_end(&self, payout: &MarketplacePayout) -> Option<NaiveDate> {
        if let Some(end) = payout.settlement_end {
            return Some(end);
        }
        if let Some(start) = payout.settlement_start {
            return Some(add_days(start, i64::from(self.timing.assumed_settlement_days)));
        }
        payout.payout_date.map(|date| {
            warn!(payout = %payout.id, "open settlement has no period dates, using payout date");
            date
        })
    }

    fn reject(&self, date: NaiveDate, amount: Decimal) -> Option<SkipReason> {
        if date < self.today() {
            Some(SkipReason::PastDated)
        } else if amount.is_zero() {
            Some(SkipReason::ZeroAmount)
        } else {
            None
        }
    }
}
