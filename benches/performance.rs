use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use metacasa_core::core::services::{SummaryService, TransactionFilter, TrendService};
use metacasa_core::domain::{FinanceBook, OwnerId, Period, Transaction, TransactionKind};
use metacasa_core::storage::json_backend::{load_book_from_path, save_book_to_path};
use tempfile::tempdir;

const CATEGORIES: [&str; 6] = ["Vivienda", "Transporte", "Salud", "Ocio", "Alimentación", "Servicios"];

fn build_sample_book(txn_count: usize) -> FinanceBook {
    let owner = OwnerId::new("benchmark");
    let mut book = FinanceBook::new(owner.clone());
    let start_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for idx in 0..txn_count {
        let date = start_date + Duration::days((idx % 365) as i64);
        let (kind, category) = if idx % 10 == 0 {
            (TransactionKind::Income, "Sueldo")
        } else {
            (TransactionKind::Expense, CATEGORIES[idx % CATEGORIES.len()])
        };
        book.transactions.push(Transaction::new(
            owner.clone(),
            kind,
            50.0 + (idx % 100) as f64,
            category,
            date,
        ));
    }
    book
}

fn bench_book_io(c: &mut Criterion) {
    let book = build_sample_book(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("book.json");

    c.bench_function("book_save_10k", |b| {
        b.iter(|| {
            save_book_to_path(&book, &file_path).expect("save book");
        })
    });

    save_book_to_path(&book, &file_path).expect("seed");

    c.bench_function("book_load_10k", |b| {
        b.iter(|| {
            let loaded = load_book_from_path(&file_path).expect("load book");
            black_box(loaded);
        })
    });
}

fn bench_aggregation(c: &mut Criterion) {
    let book = build_sample_book(black_box(10_000));
    let period = Period::new(2025, 6).unwrap();

    c.bench_function("monthly_stats_10k", |b| {
        b.iter(|| black_box(SummaryService::monthly_stats(&book, period)))
    });

    c.bench_function("filter_month_sorted_10k", |b| {
        let filter = TransactionFilter::for_period(period).query("o");
        b.iter(|| black_box(filter.apply(&book.transactions).len()))
    });

    c.bench_function("trend_series_12m_10k", |b| {
        b.iter(|| black_box(TrendService::monthly_series(&book.transactions, period, 12)))
    });
}

criterion_group!(benches, bench_book_io, bench_aggregation);
criterion_main!(benches);
