// ============================================================================
// Precision Domain Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Conversion - External values into context scalars (barrier included)
// 2. Arithmetic - Scalar operations at several precisions
// 3. Reconstruction - Bounded rational recovery
// 4. Comparison - Approximate equality
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigInt;
use num_rational::BigRational;
use precision_domain::prelude::*;
use std::hint::black_box;

const PRECISIONS: [usize; 3] = [53, 113, 237];

// ============================================================================
// Conversion Benchmarks
// ============================================================================

fn benchmark_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let ctx = PrecisionContext::double().unwrap();

    group.bench_function("integer", |b| {
        b.iter(|| black_box(ctx.convert(black_box(123_456_789i64)).unwrap()))
    });

    group.bench_function("float", |b| {
        b.iter(|| black_box(ctx.convert(black_box(0.1f64)).unwrap()))
    });

    group.bench_function("text", |b| {
        b.iter(|| black_box(ctx.convert(black_box("3.14159265358979")).unwrap()))
    });

    let third = BigRational::new(BigInt::from(1), BigInt::from(3));
    group.bench_function("rational", |b| {
        b.iter(|| black_box(ctx.convert(black_box(third.clone())).unwrap()))
    });

    group.finish();
}

// ============================================================================
// Arithmetic Benchmarks
// ============================================================================

fn benchmark_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    for bits in PRECISIONS {
        let ctx = PrecisionContext::new(ContextConfig::new().with_precision_bits(bits)).unwrap();
        let a = ctx.pi();
        let b = ctx.e();

        group.bench_with_input(BenchmarkId::new("mul", bits), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a * *b))
        });

        group.bench_with_input(BenchmarkId::new("div", bits), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a / *b))
        });

        // exercises the barrier's zeroing branch
        group.bench_with_input(BenchmarkId::new("cancel", bits), &a, |bench, a| {
            bench.iter(|| black_box(*a - *a))
        });
    }

    group.finish();
}

// ============================================================================
// Reconstruction Benchmarks
// ============================================================================

fn benchmark_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction");

    for bits in PRECISIONS {
        let ctx = PrecisionContext::new(ContextConfig::new().with_precision_bits(bits)).unwrap();
        let third = ctx.convert_real(BigRational::new(BigInt::from(1), BigInt::from(3))).unwrap();
        let pi = ctx.pi();

        group.bench_with_input(BenchmarkId::new("third", bits), &third, |b, x| {
            b.iter(|| black_box(ctx.to_rational(x, true).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("pi", bits), &pi, |b, x| {
            b.iter(|| black_box(ctx.to_rational(x, true).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// Comparison Benchmarks
// ============================================================================

fn benchmark_almost_equal(c: &mut Criterion) {
    let mut group = c.benchmark_group("almost_equal");
    let ctx = PrecisionContext::double().unwrap();
    let one = ctx.convert("1.0").unwrap();
    let close = ctx.convert("1.00000000000001").unwrap();
    let far = ctx.convert("1.001").unwrap();

    group.bench_function("absolute_hit", |b| {
        b.iter(|| black_box(ctx.almost_eq(&one, &close).unwrap()))
    });

    group.bench_function("relative_miss", |b| {
        b.iter(|| black_box(ctx.almost_eq(&one, &far).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_conversion,
    benchmark_arithmetic,
    benchmark_reconstruction,
    benchmark_almost_equal,
);

criterion_main!(benches);
