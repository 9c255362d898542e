//! Benchmarks for the SGD factorizer
//!
//! Run with: cargo bench --bench factorization_benchmarks
//! HTML reports: target/criterion/report/index.html

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matrix_factorization::{FactorizationConfig, SgdFactorizer, TargetMatrix};
use ndarray::Array2;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::{Rng, SeedableRng};

/// Ratings in 1..=5 with roughly `density` of the cells observed
fn create_ratings_matrix(n_rows: usize, n_cols: usize, density: f64) -> TargetMatrix {
    let mut rng = StdRng::seed_from_u64(0);
    let data = Array2::from_shape_simple_fn((n_rows, n_cols), || {
        if rng.gen::<f64>() < density {
            rng.gen_range(1..=5) as f64
        } else {
            0.0
        }
    });
    TargetMatrix::new(data).unwrap()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("sgd_fit");
    group.sample_size(10);

    for &size in &[20usize, 50, 100] {
        let target = create_ratings_matrix(size, size, 0.2);
        let config = FactorizationConfig::with_rank(5).seed(42).max_iter(200);
        let factorizer = SgdFactorizer::with_config(config);

        group.bench_with_input(BenchmarkId::from_parameter(size), &target, |b, target| {
            b.iter(|| factorizer.fit(black_box(target)).unwrap())
        });
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("sgd_rank");
    group.sample_size(10);
    let target = create_ratings_matrix(50, 40, 0.3);

    for &rank in &[2usize, 8, 32] {
        let config = FactorizationConfig::with_rank(rank).seed(42).max_iter(100);
        let factorizer = SgdFactorizer::with_config(config);
        group.bench_with_input(BenchmarkId::from_parameter(rank), &target, |b, target| {
            b.iter(|| factorizer.fit(black_box(target)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_rank);
criterion_main!(benches);
