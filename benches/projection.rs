use cashflow_core::config::ProjectionConfig;
use cashflow_core::projection::{analyze, ProjectionService};
use cashflow_core::sources::{
    BankBalance, CreditCardAccount, FlowDirection, Frequency, IncomeItem, MarketplacePayout,
    PayoutStatus, RecurringRule, SourceSnapshot, VendorObligation,
};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn build_sample_snapshot(record_count: usize, today: NaiveDate) -> SourceSnapshot {
    let mut snapshot = SourceSnapshot::new(BankBalance::new(
        Decimal::from(250_000),
        Decimal::from(252_500),
    ));
    let frequencies = [
        Frequency::Daily,
        Frequency::Weekdays,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    for idx in 0..record_count {
        let date = today + Duration::days((idx % 365) as i64);
        let amount = Decimal::new(5_000 + (idx % 100) as i64 * 125, 2);
        match idx % 5 {
            0 => snapshot.vendors.push(VendorObligation::new(amount, date)),
            1 => snapshot.incomes.push(IncomeItem::new(amount, date)),
            2 => snapshot.recurring.push(RecurringRule::new(
                amount,
                frequencies[idx % frequencies.len()],
                today - Duration::days((idx % 60) as i64),
                if idx % 2 == 0 {
                    FlowDirection::Expense
                } else {
                    FlowDirection::Income
                },
            )),
            3 => {
                let mut card = CreditCardAccount::new(amount, date);
                card.credit_limit = Decimal::from(10_000);
                card.available_credit = Decimal::from(7_500);
                card.forecast_next_cycle = true;
                snapshot.credit_cards.push(card);
            }
            _ => snapshot.payouts.push(
                MarketplacePayout::new(amount * Decimal::from(10), PayoutStatus::Forecasted)
                    .with_payout_date(date),
            ),
        }
    }
    snapshot
}

fn bench_projection(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let snapshot = build_sample_snapshot(black_box(2_000), today);
    let config = ProjectionConfig::default()
        .with_reserve(Decimal::from(5_000))
        .with_horizon(365);

    c.bench_function("projection_365d_2k_records", |b| {
        b.iter(|| {
            let report = ProjectionService::run(&snapshot, &config, today).expect("projection");
            black_box(report);
        })
    });

    let series = ProjectionService::run(&snapshot, &config, today)
        .expect("seed")
        .series;
    c.bench_function("safe_spending_365d", |b| {
        b.iter(|| black_box(analyze(&series, Decimal::from(5_000))))
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let snapshot = build_sample_snapshot(black_box(10_000), today);
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("snapshot.json");

    c.bench_function("snapshot_save_10k", |b| {
        b.iter(|| snapshot.save_to_path(&file_path).expect("save snapshot"))
    });

    snapshot.save_to_path(&file_path).expect("seed");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter_batched(
            || file_path.clone(),
            |path| black_box(SourceSnapshot::load_from_path(&path).expect("load snapshot")),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_projection, bench_snapshot_io);
criterion_main!(benches);
