//! Read-only shapes of the upstream record stores the projection engine consumes.
//!
//! Each store is owned elsewhere; the engine only ever sees a point-in-time
//! [`SourceSnapshot`]. Every downstream stage works over [`SourceRecord`], the closed
//! set of record kinds, rather than branching on loosely-shaped data.

pub mod credit_card;
pub mod income;
pub mod payout;
pub mod recurring;
pub mod snapshot;
pub mod vendor;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use credit_card::CreditCardAccount;
pub use income::{IncomeItem, IncomeStatus};
pub use payout::{MarketplacePayout, PayoutStatus};
pub use recurring::{FlowDirection, Frequency, RecurringRule};
pub use snapshot::{BalanceBasis, BankBalance, SourceSnapshot};
pub use vendor::{ScheduledPayment, VendorObligation, VendorStatus};

/// Upstream store a cash-flow event originated from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Vendor,
    Income,
    Recurring,
    CreditCard,
    MarketplacePayout,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Vendor => "vendor",
            SourceType::Income => "income",
            SourceType::Recurring => "recurring",
            SourceType::CreditCard => "credit_card",
            SourceType::MarketplacePayout => "marketplace_payout",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed upstream record of any supported kind.
#[derive(Debug, Clone, Copy)]
pub enum SourceRecord<'a> {
    Vendor(&'a VendorObligation),
    Income(&'a IncomeItem),
    Recurring(&'a RecurringRule),
    CreditCard(&'a CreditCardAccount),
    MarketplacePayout(&'a MarketplacePayout),
}

impl SourceRecord<'_> {
    pub fn source_type(&self) -> SourceType {
        match self {
            SourceRecord::Vendor(_) => SourceType::Vendor,
            SourceRecord::Income(_) => SourceType::Income,
            SourceRecord::Recurring(_) => SourceType::Recurring,
            SourceRecord::CreditCard(_) => SourceType::CreditCard,
            SourceRecord::MarketplacePayout(_) => SourceType::MarketplacePayout,
        }
    }

    pub fn source_id(&self) -> Uuid {
        match self {
            SourceRecord::Vendor(record) => record.id,
            SourceRecord::Income(record) => record.id,
            SourceRecord::Recurring(record) => record.id,
            SourceRecord::CreditCard(record) => record.id,
            SourceRecord::MarketplacePayout(record) => record.id,
        }
    }
}
