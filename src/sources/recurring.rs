use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fixed-amount charge or income that repeats on a calendar schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringRule {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub direction: FlowDirection,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Individual occurrences the owner has skipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_dates: Vec<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl RecurringRule {
    pub fn new(
        amount: Decimal,
        frequency: Frequency,
        start_date: NaiveDate,
        direction: FlowDirection,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            amount,
            frequency,
            start_date,
            end_date: None,
            direction,
            is_active: true,
            skip_dates: Vec::new(),
        }
    }

    pub fn ending_on(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn is_skipped(&self, date: NaiveDate) -> bool {
        self.skip_dates.contains(&date)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekdays,
    Weekly,
    #[serde(alias = "bi_weekly")]
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekdays => "Weekdays",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Every 2 Weeks",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlowDirection {
    Income,
    Expense,
}
