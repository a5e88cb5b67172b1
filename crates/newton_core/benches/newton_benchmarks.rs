//! Criterion benchmarks for the Newton-Raphson solver.
//!
//! Compares analytical, finite-difference and dual-number Jacobians on a
//! scalar problem, and measures vector solves as the dimension grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use newton_core::math::jacobian::approximate_jacobian;
use newton_core::math::solvers::{DifferenceScheme, NewtonConfig, NewtonSolver};

/// Benchmark scalar solves with each way of obtaining the derivative.
fn bench_scalar_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_solve");
    let config = NewtonConfig::new(1e-12, 50);
    let f = |x: &f64| x * x * x - x - 2.0;

    let analytical = NewtonSolver::new(f, config).with_jacobian(|x: &f64| 3.0 * x * x - 1.0);
    group.bench_function("analytical", |b| {
        b.iter(|| analytical.solve(black_box(1.5)).unwrap());
    });

    let forward = NewtonSolver::new(f, config);
    group.bench_function("forward_difference", |b| {
        b.iter(|| forward.solve(black_box(1.5)).unwrap());
    });

    let central = NewtonSolver::new(f, config.with_difference(DifferenceScheme::Central));
    group.bench_function("central_difference", |b| {
        b.iter(|| central.solve(black_box(1.5)).unwrap());
    });

    #[cfg(feature = "num-dual-mode")]
    {
        use num_dual::Dual64;

        let dual = NewtonSolver::from_dual(|x: Dual64| x * x * x - x - Dual64::from(2.0), config);
        group.bench_function("dual_number", |b| {
            b.iter(|| dual.solve(black_box(1.5)).unwrap());
        });
    }

    group.finish();
}

/// Separable system `x_i² − (i + 1) = 0` of dimension `n`.
#[allow(clippy::ptr_arg)]
fn separable(x: &Vec<f64>) -> Vec<f64> {
    x.iter()
        .enumerate()
        .map(|(i, xi)| xi * xi - (i + 1) as f64)
        .collect()
}

/// Benchmark vector solves and Jacobian approximation across dimensions.
fn bench_vector_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_solve");
    let config = NewtonConfig::new(1e-10, 50);

    for n in [2, 8, 32] {
        let x0 = vec![1.0; n];

        let solver = NewtonSolver::new(separable, config);
        group.bench_with_input(BenchmarkId::new("finite_difference", n), &x0, |b, x0| {
            b.iter(|| solver.solve(black_box(x0.clone())).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("jacobian", n), &x0, |b, x0| {
            b.iter(|| approximate_jacobian(separable, black_box(x0), 1e-6).unwrap());
        });
    }

    group.finish();
}

/// Benchmark batch solving across many initial guesses.
#[cfg(feature = "parallel")]
fn bench_batch_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_solve");
    let solver = NewtonSolver::new(|x: &f64| x * x - 2.0, NewtonConfig::new(1e-12, 50));

    for size in [100, 1000] {
        let guesses: Vec<f64> = (1..=size).map(|i| i as f64 / 10.0).collect();
        group.bench_with_input(BenchmarkId::new("parallel", size), &guesses, |b, guesses| {
            b.iter(|| solver.solve_batch(black_box(guesses)));
        });
        group.bench_with_input(BenchmarkId::new("sequential", size), &guesses, |b, guesses| {
            b.iter(|| {
                guesses
                    .iter()
                    .map(|&x0| solver.solve(x0))
                    .collect::<Vec<_>>()
            });
        });
    }

    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn bench_batch_solve(_c: &mut Criterion) {}

criterion_group!(
    benches,
    bench_scalar_solve,
    bench_vector_solve,
    bench_batch_solve
);
criterion_main!(benches);
