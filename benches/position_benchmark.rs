use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

use ganttline::models::time::{DateWindow, TimeUnit};
use ganttline::services::{compute_position, generate_buckets};
use ganttline::{EngineOptions, TimelineEngine};

fn year_window() -> DateWindow {
    DateWindow::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
    )
}

fn bench_bucket_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("bucket_generation");
    let window = year_window();

    for unit in [TimeUnit::Day, TimeUnit::Week, TimeUnit::Month, TimeUnit::Quarter] {
        group.bench_with_input(
            BenchmarkId::new("full_year", format!("{:?}", unit)),
            &unit,
            |b, &unit| {
                b.iter(|| generate_buckets(black_box(&window), black_box(unit)));
            },
        );
    }

    group.finish();
}

fn bench_position_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_scan");
    let window = year_window();
    let buckets = generate_buckets(&window, TimeUnit::Day);
    let start = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();

    group.bench_function("day_buckets_mid_year_record", |b| {
        b.iter(|| {
            compute_position(
                black_box(start),
                black_box(end),
                black_box(&buckets),
                TimeUnit::Day,
            )
        });
    });

    group.finish();
}

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");

    let records: Vec<serde_json::Value> = (0..1000)
        .map(|i| {
            let start_day = 1 + (i % 27) as u32;
            let month = 1 + (i % 12) as u32;
            json!({
                "id": format!("ISSUE-{}", i),
                "title": format!("Task {}", i),
                "startDate": format!("2024-{:02}-{:02}", month, start_day),
                "dueDate": format!("2024-{:02}-{:02}", month, start_day + 1),
            })
        })
        .collect();

    for unit in [TimeUnit::Week, TimeUnit::Month] {
        group.bench_with_input(
            BenchmarkId::new("records_1000", format!("{:?}", unit)),
            &unit,
            |b, &unit| {
                let engine = TimelineEngine::new(EngineOptions::default(), year_window(), unit);
                b.iter(|| engine.annotate(black_box(&records)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_bucket_generation,
    bench_position_scan,
    bench_annotate
);
criterion_main!(benches);
