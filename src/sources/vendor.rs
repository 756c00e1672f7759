use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An amount owed to a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorObligation {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: VendorStatus,
    /// Instalments replacing the single lump payment when present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_schedule: Vec<ScheduledPayment>,
}

impl VendorObligation {
    pub fn new(amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            amount,
            due_date: Some(due_date),
            status: VendorStatus::Pending,
            payment_schedule: Vec::new(),
        }
    }

    pub fn with_schedule(mut self, schedule: Vec<ScheduledPayment>) -> Self {
        self.payment_schedule = schedule;
        self
    }

    pub fn has_schedule(&self) -> bool {
        !self.payment_schedule.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledPayment {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    #[default]
    Pending,
    Overdue,
    PartiallyPaid,
    Paid,
    Completed,
}

impl VendorStatus {
    /// Paid and completed obligations no longer move money.
    pub fn is_settled(&self) -> bool {
        matches!(self, VendorStatus::Paid | VendorStatus::Completed)
    }
}
