use std::fmt;
use std::path::Path;

use colored::Colorize;
use rust_decimal::Decimal;

use crate::config::ProjectionConfig;
use crate::errors::Result;
use crate::projection::{BreachSeverity, DailyBalancePoint, ProjectionReport};
use crate::sources::BalanceBasis;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Info => text,
        MessageKind::Success => format!("[ok] {text}").bright_green().to_string(),
        MessageKind::Warning => format!("[!] {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("[x] {text}").bright_red().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        MessageKind::Error => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

pub fn print_report(report: &ProjectionReport, all_days: bool) {
    let result = &report.safe_spending;
    let window = report.window;

    section(format!(
        "Projection {} .. {} ({} days)",
        window.start_date(),
        window.last_day(),
        window.horizon_days()
    ));
    let basis = match report.balance_basis {
        BalanceBasis::Available => "available",
        BalanceBasis::Ledger => "ledger",
    };
    info(format!(
        "Starting balance ({basis}): {}",
        format_money(report.starting_balance)
    ));
    info(format!("Reserve floor: {}", format_money(result.reserve_amount)));
    info(format!(
        "Lowest projected balance: {} on {}",
        format_money(result.lowest_projected_balance),
        result.lowest_balance_date
    ));

    let limit = format!("Safe to spend today: {}", format_money(result.safe_spending_limit));
    if result.safe_spending_limit < Decimal::ZERO {
        warning(format!("{limit} (reserve cannot be maintained)"));
    } else {
        success(limit);
    }

    match result.breach {
        Some(breach) if breach.severity == BreachSeverity::Hard => {
            warning(format!("Balance goes negative on {}", breach.date));
        }
        Some(breach) => warning(format!("Balance dips below reserve on {}", breach.date)),
        None => {}
    }

    section("Buying opportunities");
    if result.opportunities.is_empty() {
        info("None in this horizon");
    }
    for opportunity in &result.opportunities {
        info(format!(
            "{:>14}  spend from {}  (funds back by {})",
            format_money(opportunity.spendable_amount),
            opportunity.earliest_safe_spend_date,
            opportunity.funds_available_date
        ));
    }

    section("Daily balance");
    info(format!(
        "{:<12} {:>14} {:>14} {:>14}",
        "date", "start", "change", "end"
    ));
    for point in report
        .series
        .iter()
        .filter(|point| all_days || !point.contributing_events.is_empty())
    {
        print_point(point);
    }

    let totals = &report.totals;
    section("Totals");
    info(format!(
        "{} events: +{} / -{} (net {})",
        totals.event_count,
        format_money(totals.total_inflow),
        format_money(totals.total_outflow),
        format_money(totals.net)
    ));
    if !report.skipped.is_empty() {
        warning(format!("{} records left out of the projection", report.skipped.len()));
        for skipped in &report.skipped {
            info(format!(
                "  {} {}: {}",
                skipped.source_type, skipped.source_id, skipped.reason
            ));
        }
    }
}

fn print_point(point: &DailyBalancePoint) {
    let line = format!(
        "{:<12} {:>14} {:>14} {:>14}",
        point.date.to_string(),
        format_money(point.starting_balance),
        format_money(point.net_change),
        format_money(point.ending_balance)
    );
    if point.ending_balance < Decimal::ZERO {
        println!("{}", line.bright_red());
    } else {
        println!("{}", line);
    }
}

pub fn print_config(path: &Path, config: &ProjectionConfig) -> Result<()> {
    section(format!("Configuration ({})", path.display()));
    info(serde_json::to_string_pretty(config)?);
    Ok(())
}
