//! Benchmarks for the fair value fit and rolling correlation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use liquidity_terminal::indicators::rolling_correlation;
use liquidity_terminal::model::{FairValueModel, LinearModel};

fn synthetic(n: usize, step: f64) -> Vec<f64> {
    (0..n).map(|i| 5000.0 + i as f64 * step + ((i * 37) % 101) as f64).collect()
}

fn benchmark_linear_fit(c: &mut Criterion) {
    let liquidity = synthetic(1260, 1.0);
    let price = synthetic(1260, 2.0);
    let model = LinearModel::new(252);

    c.bench_function("linear_fair_value_fit", |b| {
        b.iter(|| model.fit(black_box(&liquidity), black_box(&price)))
    });
}

fn benchmark_rolling_correlation(c: &mut Criterion) {
    let liquidity = synthetic(1260, 1.0);
    let price = synthetic(1260, 2.0);

    c.bench_function("rolling_correlation_90", |b| {
        b.iter(|| rolling_correlation(black_box(&liquidity), black_box(&price), 90))
    });
}

criterion_group!(benches, benchmark_linear_fit, benchmark_rolling_correlation);
criterion_main!(benches);
