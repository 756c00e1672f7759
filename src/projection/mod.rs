//! Cash-flow projection pipeline.
//!
//! Records flow through the recurrence expander and normalizer into a timeline,
//! which the simulator turns into a daily balance series, which the safe-spending
//! analysis reads. Every stage is a pure function of its inputs; "today" is always
//! passed in explicitly.

pub mod event;
pub mod normalizer;
pub mod recurrence;
pub mod safe_spending;
pub mod simulator;
pub mod timeline;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

pub use event::{CashFlowEvent, EventKind, SettlementMeta};
pub use normalizer::{EventNormalizer, Normalized, PayoutTiming, SkipReason, SkippedRecord};
pub use safe_spending::{
    analyze, BreachSeverity, BuyingOpportunity, ReserveBreach, SafeSpendingResult,
};
pub use simulator::{simulate, DailyBalancePoint};
pub use timeline::{ProjectionWindow, Timeline, TimelineOptions};

use crate::config::ProjectionConfig;
use crate::errors::Result;
use crate::sources::{BalanceBasis, SourceSnapshot};

/// Inflow and outflow totals over the events inside the window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionTotals {
    pub event_count: usize,
    pub total_inflow: Decimal,
    pub total_outflow: Decimal,
    pub net: Decimal,
}

impl ProjectionTotals {
    fn from_timeline(timeline: &Timeline) -> Self {
        let mut totals = ProjectionTotals::default();
        for event in timeline.events() {
            totals.event_count += 1;
            if event.amount >= Decimal::ZERO {
                totals.total_inflow += event.amount;
            } else {
                totals.total_outflow += event.amount.abs();
            }
        }
        totals.net = totals.total_inflow - totals.total_outflow;
        totals
    }
}

/// Everything a presentation layer needs from one projection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub window: ProjectionWindow,
    pub balance_basis: BalanceBasis,
    pub starting_balance: Decimal,
    pub series: Vec<DailyBalancePoint>,
    pub safe_spending: SafeSpendingResult,
    pub totals: ProjectionTotals,
    pub skipped: Vec<SkippedRecord>,
}

/// Runs the full projection pipeline over a snapshot.
pub struct ProjectionService;

impl ProjectionService {
    /// Projects `snapshot` forward from `today` using `config`.
    ///
    /// Fails only when the configuration itself is invalid; malformed records are
    /// skipped and listed in the report.
    pub fn run(
        snapshot: &SourceSnapshot,
        config: &ProjectionConfig,
        today: NaiveDate,
    ) -> Result<ProjectionReport> {
        config.validate()?;
        let window = ProjectionWindow::new(today, config.horizon_days)?;

        let normalized =
            EventNormalizer::new(window, config.payout_timing()).normalize_snapshot(snapshot);
        let options = TimelineOptions {
            exclude_today: config.exclude_today_events,
        };
        let timeline = Timeline::build(normalized.events, window, options);

        let balance_basis = BalanceBasis::from_flag(config.use_available_balance);
        let starting_balance = snapshot.bank.seed(balance_basis);
        let series = simulate(starting_balance, &timeline);
        let safe_spending = analyze(&series, config.reserve_amount);

        info!(
            horizon_days = window.horizon_days(),
            events = timeline.event_count(),
            lowest = %safe_spending.lowest_projected_balance,
            limit = %safe_spending.safe_spending_limit,
            "projection complete"
        );

        Ok(ProjectionReport {
            window,
            balance_basis,
            starting_balance,
            totals: ProjectionTotals::from_timeline(&timeline),
            series,
            safe_spending,
            skipped: normalized.skipped,
        })
    }
}
