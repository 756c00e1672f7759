mod common;

use cashflow_core::projection::{
    EventKind, EventNormalizer, PayoutTiming, ProjectionWindow, SkipReason,
};
use cashflow_core::sources::{
    CreditCardAccount, FlowDirection, Frequency, IncomeItem, IncomeStatus, MarketplacePayout,
    PayoutStatus, RecurringRule, ScheduledPayment, SourceRecord, SourceType, VendorObligation,
    VendorStatus,
};
use common::{day, money, today};
use rust_decimal::Decimal;

fn normalizer() -> EventNormalizer {
    let window = ProjectionWindow::new(today(), 30).unwrap();
    EventNormalizer::new(window, PayoutTiming::default())
}

#[test]
fn open_vendor_obligation_becomes_outflow_on_due_date() {
    let vendor = VendorObligation::new(money(1_200), day(4));
    let out = normalizer().normalize(SourceRecord::Vendor(&vendor));
    assert_eq!(out.events.len(), 1);
    let event = &out.events[0];
    assert_eq!(event.date, day(4));
    assert_eq!(event.amount, money(-1_200));
    assert_eq!(event.kind, EventKind::Outflow);
    assert_eq!(event.source_type, SourceType::Vendor);
    assert_eq!(event.source_id, vendor.id);
}

#[test]
fn paid_and_partially_paid_vendors_are_excluded() {
    let cases = [
        (VendorStatus::Paid, SkipReason::AlreadyPaid),
        (VendorStatus::Completed, SkipReason::AlreadyPaid),
        (VendorStatus::PartiallyPaid, SkipReason::PartiallyPaid),
    ];
    for (status, reason) in cases {
        let mut vendor = VendorObligation::new(money(500), day(3));
        vendor.status = status;
        let out = normalizer().normalize(SourceRecord::Vendor(&vendor));
        assert!(out.events.is_empty());
        assert_eq!(out.skipped[0].reason, reason);
    }
}

#[test]
fn payment_schedule_replaces_lump_sum() {
    let vendor = VendorObligation::new(money(900), day(10)).with_schedule(vec![
        ScheduledPayment {
            date: day(-2),
            amount: money(300),
        },
        ScheduledPayment {
            date: day(5),
            amount: money(300),
        },
        ScheduledPayment {
            date: day(12),
            amount: money(300),
        },
    ]);
    let out = normalizer().normalize(SourceRecord::Vendor(&vendor));
    let dates: Vec<_> = out.events.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(5), day(12)]);
    assert!(out.events.iter().all(|e| e.amount == money(-300)));
    assert_ne!(out.events[0].id, out.events[1].id);
}

#[test]
fn received_income_is_excluded_and_pending_income_is_inflow() {
    let pending = IncomeItem::new(money(750), day(2));
    let out = normalizer().normalize(SourceRecord::Income(&pending));
    assert_eq!(out.events[0].amount, money(750));
    assert_eq!(out.events[0].kind, EventKind::Inflow);

    let mut received = IncomeItem::new(money(750), day(2));
    received.status = IncomeStatus::Received;
    let out = normalizer().normalize(SourceRecord::Income(&received));
    assert!(out.events.is_empty());
    assert_eq!(out.skipped[0].reason, SkipReason::Received);
}

#[test]
fn past_dated_and_undated_records_are_skipped() {
    let overdue = IncomeItem::new(money(100), day(-1));
    let out = normalizer().normalize(SourceRecord::Income(&overdue));
    assert_eq!(out.skipped[0].reason, SkipReason::PastDated);

    let mut undated = VendorObligation::new(money(100), day(1));
    undated.due_date = None;
    let out = normalizer().normalize(SourceRecord::Vendor(&undated));
    assert_eq!(out.skipped[0].reason, SkipReason::MissingDate);
}

#[test]
fn recurring_direction_follows_rule_type() {
    let salary = RecurringRule::new(money(2_000), Frequency::Biweekly, day(1), FlowDirection::Income);
    let out = normalizer().normalize(SourceRecord::Recurring(&salary));
    let dates: Vec<_> = out.events.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(1), day(15), day(29)]);
    assert!(out.events.iter().all(|e| e.amount == money(2_000)));

    let rent = RecurringRule::new(money(1_500), Frequency::Monthly, day(-20), FlowDirection::Expense);
    let out = normalizer().normalize(SourceRecord::Recurring(&rent));
    assert_eq!(out.events.len(), 1);
    assert_eq!(out.events[0].amount, money(-1_500));
}

#[test]
fn inactive_recurring_rule_is_skipped() {
    let mut rule = RecurringRule::new(money(10), Frequency::Daily, today(), FlowDirection::Expense);
    rule.is_active = false;
    let out = normalizer().normalize(SourceRecord::Recurring(&rule));
    assert!(out.events.is_empty());
    assert_eq!(out.skipped[0].reason, SkipReason::Inactive);
}

#[test]
fn credit_card_pays_statement_or_minimum() {
    let card = CreditCardAccount::new(money(1_800), day(8));
    let out = normalizer().normalize(SourceRecord::CreditCard(&card));
    assert_eq!(out.events.len(), 1);
    assert_eq!(out.events[0].amount, money(-1_800));
    assert_eq!(out.events[0].kind, EventKind::CreditPayment);

    let mut minimum_only = CreditCardAccount::new(money(1_800), day(8));
    minimum_only.pay_minimum_only = true;
    minimum_only.minimum_payment = Some(money(60));
    let out = normalizer().normalize(SourceRecord::CreditCard(&minimum_only));
    assert_eq!(out.events[0].amount, money(-60));
}

#[test]
fn credit_card_next_cycle_forecast_uses_new_spending() {
    let mut card = CreditCardAccount::new(money(1_000), day(8));
    card.credit_limit = money(5_000);
    card.available_credit = money(3_500);
    card.forecast_next_cycle = true;
    let out = normalizer().normalize(SourceRecord::CreditCard(&card));
    assert_eq!(out.events.len(), 2);
    assert_eq!(out.events[1].amount, money(-500));
    assert_eq!(
        out.events[1].date,
        chrono::NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    );

    // No new spending beyond the statement: no forecast.
    card.available_credit = money(4_000);
    let out = normalizer().normalize(SourceRecord::CreditCard(&card));
    assert_eq!(out.events.len(), 1);
}

#[test]
fn confirmed_payout_lands_day_after_settlement_end() {
    let payout = MarketplacePayout::new(money(4_200), PayoutStatus::Confirmed)
        .with_payout_date(day(1))
        .with_settlement(Some(day(-11)), Some(day(3)));
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&payout));
    let event = &out.events[0];
    assert_eq!(event.date, day(4));
    assert_eq!(event.amount, money(4_200));
    let meta = event.settlement_meta.as_ref().unwrap();
    assert_eq!(meta.status, PayoutStatus::Confirmed);
    assert_eq!(meta.settlement_end, Some(day(3)));

    let without_period =
        MarketplacePayout::new(money(100), PayoutStatus::Confirmed).with_payout_date(day(6));
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&without_period));
    assert_eq!(out.events[0].date, day(7));
}

#[test]
fn old_confirmed_payout_lands_today() {
    let late = MarketplacePayout::new(money(1_300), PayoutStatus::Confirmed)
        .with_settlement(Some(day(-20)), Some(day(-5)));
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&late));
    assert!(out.skipped.is_empty());
    assert_eq!(out.events.len(), 1);
    assert_eq!(out.events[0].date, today());
    assert_eq!(out.events[0].display_date(), today());
}

#[test]
fn estimated_payout_uses_assumed_settlement_length() {
    let open = MarketplacePayout::new(money(800), PayoutStatus::Estimated)
        .with_settlement(Some(day(-3)), None);
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&open));
    // start + 14 days closes the period, funds follow one day later.
    assert_eq!(out.events[0].date, day(12));
}

#[test]
fn estimated_payout_is_never_dropped_for_being_old() {
    let stale = MarketplacePayout::new(money(800), PayoutStatus::Estimated)
        .with_settlement(Some(day(-40)), Some(day(-26)));
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&stale));
    assert!(out.skipped.is_empty());
    assert_eq!(out.events[0].date, today());
}

#[test]
fn forecasted_payout_adds_transfer_lag_and_drops_past_predictions() {
    let upcoming =
        MarketplacePayout::new(money(3_000), PayoutStatus::Forecasted).with_payout_date(day(9));
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&upcoming));
    let event = &out.events[0];
    assert_eq!(event.date, day(10));
    assert_eq!(event.display_date(), day(9));

    let past =
        MarketplacePayout::new(money(3_000), PayoutStatus::Forecasted).with_payout_date(day(-1));
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&past));
    assert!(out.events.is_empty());
    assert_eq!(out.skipped[0].reason, SkipReason::PastDated);
}

#[test]
fn payout_without_any_date_is_skipped_not_fatal() {
    let undated = MarketplacePayout::new(money(10), PayoutStatus::Estimated);
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&undated));
    assert!(out.events.is_empty());
    assert_eq!(out.skipped[0].reason, SkipReason::MissingDate);
    assert_eq!(out.skipped[0].source_type, SourceType::MarketplacePayout);
}

#[test]
fn negative_payout_is_an_outflow() {
    let clawback =
        MarketplacePayout::new(Decimal::from(-75), PayoutStatus::Confirmed).with_payout_date(day(2));
    let out = normalizer().normalize(SourceRecord::MarketplacePayout(&clawback));
    assert_eq!(out.events[0].kind, EventKind::Outflow);
    assert_eq!(out.events[0].amount, money(-75));
}
