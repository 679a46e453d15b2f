//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure calculation, FIFO deduction over growing ledgers, and the
//! preview endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use axum::{body::Body, http::Request};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{PayrollInput, calculate_payroll};
use payroll_engine::config::PayrollSettings;
use payroll_engine::ledger::apply_deduction;
use payroll_engine::models::{AdvanceEntry, AttendanceDay, PayrollPeriod};
use payroll_engine::store::InMemoryStore;

fn settings() -> PayrollSettings {
    PayrollSettings::new(Decimal::new(18000, 0), "Thursday", 20, true)
        .expect("Failed to build settings")
}

/// Builds a ledger of `size` advances granted on consecutive days.
fn create_ledger(size: usize) -> Vec<AdvanceEntry> {
    let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..size)
        .map(|i| {
            AdvanceEntry::new(
                format!("adv_{:04}", i),
                "emp_bench_001",
                base + Duration::days(i as i64),
                Decimal::new(50_000 + i as i64, 2),
                None,
            )
            .unwrap()
        })
        .collect()
}

/// Creates a store with `employees` employees, each present on 22 days of
/// April 2026 and holding three advances.
fn create_seeded_store(employees: usize) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store.put_settings(settings());
    let start = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

    for e in 0..employees {
        let employee_id = format!("emp_bench_{:03}", e);
        for date in start
            .iter_days()
            .take(30)
            .filter(|d| d.weekday() != Weekday::Thu)
            .take(22)
        {
            store.record_attendance(AttendanceDay {
                employee_id: employee_id.clone(),
                date,
                arrival: date.and_hms_opt(9, 0, 0),
                departure: date.and_hms_opt(18, 0, 0),
            });
        }
        for a in 0..3 {
            store
                .grant_advance(
                    AdvanceEntry::new(
                        format!("adv_{:03}_{}", e, a),
                        employee_id.clone(),
                        start - Duration::days(30 * (a as i64 + 1)),
                        Decimal::new(2000, 0),
                        None,
                    )
                    .unwrap(),
                )
                .unwrap();
        }
    }
    store
}

/// Benchmark: one pure salary calculation.
fn bench_calculate_payroll(c: &mut Criterion) {
    let settings = settings();
    let input = PayrollInput {
        employee_id: "emp_bench_001".to_string(),
        period: PayrollPeriod::new(2026, 4).unwrap(),
        days_present: 22,
        monthly_salary: Decimal::new(18000, 0),
        advance_balance: Decimal::new(5000, 0),
        other_deductions: Decimal::new(500, 0),
    };

    c.bench_function("calculate_payroll", |b| {
        b.iter(|| black_box(calculate_payroll(black_box(&input), &settings)))
    });
}

/// Benchmark: FIFO deduction that drains about half of the ledger.
fn bench_fifo_deduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("fifo_deduction");

    for size in [1usize, 10, 100, 1000] {
        let ledger = create_ledger(size);
        let amount = Decimal::new(50_000 * (size as i64) / 2 + 1, 2);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| black_box(apply_deduction(black_box(ledger), amount)))
        });
    }

    group.finish();
}

/// Benchmark: preview requests through the HTTP router.
fn bench_preview_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = create_seeded_store(100);
    let state = AppState::new(store);

    let bodies: Vec<String> = (0..100)
        .map(|e| {
            serde_json::json!({
                "employee_id": format!("emp_bench_{:03}", e),
                "month": 4,
                "year": 2026,
                "other_deductions": "250"
            })
            .to_string()
        })
        .collect();

    c.bench_function("preview_single", |b| {
        b.to_async(&rt).iter(|| async {
            let router = create_router(state.clone());
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/preview")
                        .header("Content-Type", "application/json")
                        .body(Body::from(bodies[0].clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });

    let mut group = c.benchmark_group("preview_batch");
    group.throughput(Throughput::Elements(100));
    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &bodies {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/payroll/preview")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_calculate_payroll,
    bench_fifo_deduction,
    bench_preview_endpoint
);
criterion_main!(benches);
