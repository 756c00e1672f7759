use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    CreditCardAccount, IncomeItem, MarketplacePayout, RecurringRule, SourceRecord,
    VendorObligation,
};
use crate::errors::Result;

/// Current bank position used to seed the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct BankBalance {
    /// Balance net of pending holds, as computed by the bank.
    #[serde(default)]
    pub available_balance: Decimal,
    /// Posted balance, before pending holds.
    #[serde(default)]
    pub ledger_balance: Decimal,
}

impl BankBalance {
    pub fn new(available_balance: Decimal, ledger_balance: Decimal) -> Self {
        Self {
            available_balance,
            ledger_balance,
        }
    }

    pub fn uniform(balance: Decimal) -> Self {
        Self::new(balance, balance)
    }

    pub fn seed(&self, basis: BalanceBasis) -> Decimal {
        match basis {
            BalanceBasis::Available => self.available_balance,
            BalanceBasis::Ledger => self.ledger_balance,
        }
    }
}

/// Which bank figure the simulation starts from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BalanceBasis {
    #[default]
    Available,
    Ledger,
}

impl BalanceBasis {
    pub fn from_flag(use_available_balance: bool) -> Self {
        if use_available_balance {
            BalanceBasis::Available
        } else {
            BalanceBasis::Ledger
        }
    }
}

/// Point-in-time copy of every upstream store the engine reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SourceSnapshot {
    #[serde(default)]
    pub bank: BankBalance,
    #[serde(default)]
    pub vendors: Vec<VendorObligation>,
    #[serde(default)]
    pub incomes: Vec<IncomeItem>,
    #[serde(default)]
    pub recurring: Vec<RecurringRule>,
    #[serde(default)]
    pub credit_cards: Vec<CreditCardAccount>,
    #[serde(default)]
    pub payouts: Vec<MarketplacePayout>,
}

impl SourceSnapshot {
    pub fn new(bank: BankBalance) -> Self {
        Self {
            bank,
            ..Self::default()
        }
    }

    /// Iterates over every record in a stable order: vendors, incomes, recurring
    /// rules, credit cards, then payouts, each in stored order.
    pub fn records(&self) -> impl Iterator<Item = SourceRecord<'_>> {
        self.vendors
            .iter()
            .map(SourceRecord::Vendor)
            .chain(self.incomes.iter().map(SourceRecord::Income))
            .chain(self.recurring.iter().map(SourceRecord::Recurring))
            .chain(self.credit_cards.iter().map(SourceRecord::CreditCard))
            .chain(self.payouts.iter().map(SourceRecord::MarketplacePayout))
    }

    pub fn record_count(&self) -> usize {
        self.vendors.len()
            + self.incomes.len()
            + self.recurring.len()
            + self.credit_cards.len()
            + self.payouts.len()
    }

    /// Loads a snapshot exported as JSON.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Writes the snapshot by staging to a temporary file first.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp, json)?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}
