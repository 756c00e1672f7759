use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::event::CashFlowEvent;
use crate::errors::{ProjectionError, Result};
use crate::utils::dates::add_days;

/// The days a projection covers: `horizon_days` consecutive days starting today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionWindow {
    start_date: NaiveDate,
    horizon_days: u32,
}

impl ProjectionWindow {
    pub fn new(start_date: NaiveDate, horizon_days: u32) -> Result<Self> {
        if horizon_days == 0 {
            return Err(ProjectionError::InvalidInput(
                "projection horizon must cover at least one day".into(),
            ));
        }
        Ok(Self {
            start_date,
            horizon_days,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Last simulated day, inclusive.
    pub fn last_day(&self) -> NaiveDate {
        add_days(self.start_date, i64::from(self.horizon_days) - 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.last_day()
    }

    /// Every calendar day of the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start_date;
        (0..i64::from(self.horizon_days)).map(move |offset| add_days(start, offset))
    }
}

/// Membership toggles applied identically to every source type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineOptions {
    /// Leave out events landing on the window's first day.
    pub exclude_today: bool,
}

/// Events grouped by funds-impact date, restricted to one window.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    window: ProjectionWindow,
    by_date: BTreeMap<NaiveDate, Vec<CashFlowEvent>>,
}

impl Timeline {
    /// Groups `events` by date, keeping only those inside `window`.
    ///
    /// Within a day, events keep their input order.
    pub fn build(
        events: impl IntoIterator<Item = CashFlowEvent>,
        window: ProjectionWindow,
        options: TimelineOptions,
    ) -> Self {
        let mut by_date: BTreeMap<NaiveDate, Vec<CashFlowEvent>> = BTreeMap::new();
        let mut dropped = 0usize;
        for event in events {
            let is_today = event.date == window.start_date();
            if !window.contains(event.date) || (options.exclude_today && is_today) {
                dropped += 1;
                continue;
            }
            by_date.entry(event.date).or_default().push(event);
        }
        tracing::debug!(
            days_with_events = by_date.len(),
            dropped,
            "timeline built"
        );
        Self { window, by_date }
    }

    pub fn window(&self) -> ProjectionWindow {
        self.window
    }

    pub fn events_on(&self, date: NaiveDate) -> &[CashFlowEvent] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn net_change_on(&self, date: NaiveDate) -> Decimal {
        self.events_on(date).iter().map(|event| event.amount).sum()
    }

    /// All events in chronological order.
    pub fn events(&self) -> impl Iterator<Item = &CashFlowEvent> {
        self.by_date.values().flatten()
    }

    pub fn event_count(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
