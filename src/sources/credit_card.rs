use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Statement state of a credit card whose payment leaves the bank account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditCardAccount {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub statement_balance: Decimal,
    #[serde(default)]
    pub minimum_payment: Option<Decimal>,
    #[serde(default)]
    pub credit_limit: Decimal,
    #[serde(default)]
    pub available_credit: Decimal,
    #[serde(default)]
    pub payment_due_date: Option<NaiveDate>,
    #[serde(default)]
    pub pay_minimum_only: bool,
    #[serde(default)]
    pub forecast_next_cycle: bool,
}

impl CreditCardAccount {
    pub fn new(statement_balance: Decimal, payment_due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            balance: statement_balance,
            statement_balance,
            minimum_payment: None,
            credit_limit: Decimal::ZERO,
            available_credit: Decimal::ZERO,
            payment_due_date: Some(payment_due_date),
            pay_minimum_only: false,
            forecast_next_cycle: false,
        }
    }

    /// Spending since the statement closed, i.e. next cycle's balance when positive.
    pub fn projected_next_balance(&self) -> Option<Decimal> {
        let projected = self.credit_limit - self.available_credit - self.statement_balance;
        (projected > Decimal::ZERO).then_some(projected)
    }
}
