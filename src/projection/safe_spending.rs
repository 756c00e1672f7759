//! Safe-spending limit, reserve breach detection and buying opportunities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::simulator::DailyBalancePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreachSeverity {
    /// The projected balance goes negative.
    Hard,
    /// The projected balance dips below the reserve but stays non-negative.
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveBreach {
    pub date: NaiveDate,
    pub severity: BreachSeverity,
}

/// An amount that can be spent from `earliest_safe_spend_date` onwards without the
/// balance dropping below the reserve before `funds_available_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyingOpportunity {
    pub spendable_amount: Decimal,
    pub funds_available_date: NaiveDate,
    pub earliest_safe_spend_date: NaiveDate,
}

impl BuyingOpportunity {
    /// Whether spending the amount on `earliest_safe_spend_date` keeps every day up
    /// to `funds_available_date` at or above `reserve_amount`.
    pub fn holds_against(&self, series: &[DailyBalancePoint], reserve_amount: Decimal) -> bool {
        series
            .iter()
            .filter(|point| {
                point.date >= self.earliest_safe_spend_date
                    && point.date <= self.funds_available_date
            })
            .all(|point| point.ending_balance - self.spendable_amount >= reserve_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSpendingResult {
    pub reserve_amount: Decimal,
    pub available_balance: Decimal,
    pub lowest_projected_balance: Decimal,
    pub lowest_balance_date: NaiveDate,
    /// `lowest_projected_balance - reserve_amount`. Negative when the reserve
    /// itself cannot be maintained.
    pub safe_spending_limit: Decimal,
    /// Set only when the balance is projected to go negative.
    pub will_breach_reserve: bool,
    pub breach_date: Option<NaiveDate>,
    pub breach: Option<ReserveBreach>,
    pub opportunities: Vec<BuyingOpportunity>,
}

/// Amounts closer than this are shown as a single opportunity.
fn duplicate_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    valley: usize,
    funds: usize,
    amount: Decimal,
}

/// Analyzes a simulated balance series against a reserve floor.
///
/// # Panics
///
/// Panics if `series` is empty; the simulator always yields at least one day.
pub fn analyze(series: &[DailyBalancePoint], reserve_amount: Decimal) -> SafeSpendingResult {
    assert!(
        !series.is_empty(),
        "safe-spending analysis needs at least one simulated day"
    );

    let balances: Vec<Decimal> = series.iter().map(|point| point.ending_balance).collect();
    let today = series[0].date;

    let mut lowest_index = 0;
    for (index, balance) in balances.iter().enumerate() {
        if *balance < balances[lowest_index] {
            lowest_index = index;
        }
    }
    let lowest_projected_balance = balances[lowest_index];
    let safe_spending_limit = lowest_projected_balance - reserve_amount;

    let breach = detect_breach(series, reserve_amount);

    let candidates = prune_superseded(find_candidates(&balances, reserve_amount));
    let mut opportunities: Vec<BuyingOpportunity> = candidates
        .iter()
        .filter(|candidate| candidate.amount > Decimal::ZERO)
        .map(|candidate| BuyingOpportunity {
            spendable_amount: candidate.amount,
            funds_available_date: series[candidate.funds].date,
            earliest_safe_spend_date: series
                [earliest_safe_index(&balances, candidate, reserve_amount)]
            .date,
        })
        .collect();

    if safe_spending_limit > Decimal::ZERO {
        let duplicate = opportunities.first().is_some_and(|first| {
            (first.spendable_amount - safe_spending_limit).abs() < duplicate_tolerance()
        });
        if !duplicate {
            opportunities.insert(
                0,
                BuyingOpportunity {
                    spendable_amount: safe_spending_limit,
                    funds_available_date: today,
                    earliest_safe_spend_date: today,
                },
            );
        }
    }

    SafeSpendingResult {
        reserve_amount,
        available_balance: series[0].starting_balance,
        lowest_projected_balance,
        lowest_balance_date: series[lowest_index].date,
        safe_spending_limit,
        will_breach_reserve: matches!(
            breach,
            Some(ReserveBreach {
                severity: BreachSeverity::Hard,
                ..
            })
        ),
        breach_date: breach.map(|found| found.date),
        breach,
        opportunities,
    }
}

/// First negative day wins over the first day below the reserve.
fn detect_breach(series: &[DailyBalancePoint], reserve_amount: Decimal) -> Option<ReserveBreach> {
    let first_below = |threshold: Decimal| {
        series
            .iter()
            .find(|point| point.ending_balance < threshold)
            .map(|point| point.date)
    };
    if let Some(date) = first_below(Decimal::ZERO) {
        return Some(ReserveBreach {
            date,
            severity: BreachSeverity::Hard,
        });
    }
    first_below(reserve_amount).map(|date| ReserveBreach {
        date,
        severity: BreachSeverity::Soft,
    })
}

/// Local valleys after today, plus a trailing plateau at the end of the window.
///
/// Amounts are kept as `balance - reserve` even when not positive, so a low later
/// valley still supersedes an earlier one during pruning.
fn find_candidates(balances: &[Decimal], reserve_amount: Decimal) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let last = balances.len() - 1;

    for valley in 1..last {
        if balances[valley + 1] > balances[valley] {
            candidates.push(Candidate {
                valley,
                funds: valley + 1,
                amount: balances[valley] - reserve_amount,
            });
        }
    }

    if last >= 1 && balances[last] >= balances[last - 1] {
        let captured = candidates.iter().any(|candidate| candidate.funds == last);
        if !captured {
            candidates.push(Candidate {
                valley: last,
                funds: last,
                amount: balances[last] - reserve_amount,
            });
        }
    }

    candidates
}

/// Drops every candidate followed later by a strictly smaller one.
fn prune_superseded(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept = Vec::with_capacity(candidates.len());
    let mut smallest_later: Option<Decimal> = None;
    for candidate in candidates.into_iter().rev() {
        if smallest_later.map_or(true, |smallest| candidate.amount <= smallest) {
            kept.push(candidate);
        }
        smallest_later = Some(match smallest_later {
            Some(smallest) => smallest.min(candidate.amount),
            None => candidate.amount,
        });
    }
    kept.reverse();
    kept
}

/// First day from which spending the candidate amount keeps every day through
/// the valley at or above the reserve.
fn earliest_safe_index(balances: &[Decimal], candidate: &Candidate, reserve_amount: Decimal) -> usize {
    (0..=candidate.valley)
        .rev()
        .find(|&day| balances[day] - candidate.amount < reserve_amount)
        .map_or(0, |blocking| blocking + 1)
}
