//! Benchmarks for the liquidity run simulator.
//!
//! Run with: cargo bench -p ballast-liquidity

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ballast_core::BalanceSheetSnapshot;
use ballast_liquidity::RunSimulator;

fn bench_single_run(c: &mut Criterion) {
    let snapshot = BalanceSheetSnapshot::new(15.0, 77.0).unwrap();
    let sim = RunSimulator::new();

    let mut group = c.benchmark_group("single_run");
    for horizon in [30u32, 90, 365] {
        group.bench_with_input(BenchmarkId::from_parameter(horizon), &horizon, |b, &h| {
            b.iter(|| sim.run_horizon(black_box(&snapshot), h, black_box(3.0)))
        });
    }
    group.finish();
}

fn bench_stress_profile(c: &mut Criterion) {
    let snapshot = BalanceSheetSnapshot::new(20.0, 60.0).unwrap();
    let sim = RunSimulator::new();

    let mut group = c.benchmark_group("stress_profile");
    for count in [11usize, 101, 1001] {
        let levels: Vec<f64> = (0..count).map(|i| i as f64 * 10.0 / count as f64).collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &levels, |b, levels| {
            b.iter(|| sim.stress_profile(black_box(&snapshot), 30, levels))
        });
    }
    group.finish();
}

criterion_group!(runs, bench_single_run, bench_stress_profile);
criterion_main!(runs);
