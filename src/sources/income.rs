use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Money a customer is expected to pay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeItem {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: IncomeStatus,
}

impl IncomeItem {
    pub fn new(amount: Decimal, payment_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer: None,
            amount,
            payment_date: Some(payment_date),
            status: IncomeStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncomeStatus {
    #[default]
    Pending,
    Invoiced,
    Overdue,
    Received,
}
