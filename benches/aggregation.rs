use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wabastat::{
    aggregation::{compute_country_breakdown, compute_totals},
    filters::RowFilter,
    summary::Dashboard,
    types::{CounterField, Field, Row},
};

const COUNTRIES: &[&str] = &["US", "IN", "BR", "DE", "ID", ""];

fn create_test_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let mut row = Row::new()
                .with(Field::AccountId, format!("acc-{}", i % 50))
                .with(Field::Country, COUNTRIES[i % COUNTRIES.len()]);
            for (offset, field) in CounterField::ALL.into_iter().enumerate() {
                // mix numeric and text cells the way real exports do
                row = if i % 2 == 0 {
                    row.with(Field::Counter(field), (i * (offset + 1)) as f64)
                } else {
                    row.with(Field::Counter(field), (i * (offset + 1)).to_string())
                };
            }
            row
        })
        .collect()
}

fn benchmark_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_totals");

    for size in [100, 1_000, 10_000] {
        let rows = create_test_rows(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| compute_totals(black_box(rows)));
        });
    }

    group.finish();
}

fn benchmark_country_breakdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_country_breakdown");

    for size in [100, 1_000, 10_000] {
        let rows = create_test_rows(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| compute_country_breakdown(black_box(rows)));
        });
    }

    group.finish();
}

fn benchmark_filtered_dashboard(c: &mut Criterion) {
    let rows = create_test_rows(10_000);
    let filter = RowFilter::new().with_country("us".to_string());

    c.bench_function("filtered_dashboard_10k", |b| {
        b.iter(|| Dashboard::from_rows(filter.apply(black_box(rows.clone()))));
    });
}

criterion_group!(
    benches,
    benchmark_totals,
    benchmark_country_breakdown,
    benchmark_filtered_dashboard
);
criterion_main!(benches);
