//! Benchmarks for pipeline operators.
//!
//! These benchmarks measure pure execution time by:
//! 1. Using iter_batched to exclude pipeline composition from measurement
//! 2. Using shuffled data to avoid sorted-input optimizations
//! 3. Controlling key selectivity for joins and grouping

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use velum_core::{Value, ValueObject};
use velum_query::{ExecutionContext, KeySpec, Pipeline};

// ============================================================================
// Data Generation Utilities
// ============================================================================

/// Simple LCG for reproducible pseudo-random shuffling
fn shuffle_indices(count: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..count).collect();
    let mut s = seed;
    for i in (1..count).rev() {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        let j = (s as usize) % (i + 1);
        indices.swap(i, j);
    }
    indices
}

/// Creates objects with a controlled key distribution for join and
/// grouping benchmarks.
fn create_keyed_items(count: usize, key_range: usize, seed: u64) -> Vec<Value> {
    shuffle_indices(count, seed)
        .into_iter()
        .map(|i| {
            let mut obj = ValueObject::new();
            obj.insert("id", Value::Number(i as f64));
            obj.insert("key", Value::Number((i % key_range) as f64));
            obj.insert("name", Value::String(format!("value_{}", i)));
            Value::Object(obj)
        })
        .collect()
}

/// Creates plain numbers with duplicates for set-operator benchmarks.
fn create_numbers(count: usize, range: usize, seed: u64) -> Vec<Value> {
    shuffle_indices(count, seed)
        .into_iter()
        .map(|i| Value::Number((i % range) as f64))
        .collect()
}

// ============================================================================
// Set Operator Benchmarks
// ============================================================================

fn bench_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("union");

    for size in [100, 1000, 10000].iter() {
        let range = size / 10; // 90% duplicates
        let left = create_numbers(*size, range, 12345);
        let right = create_numbers(*size, range, 67890);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter_batched(
                || Pipeline::from_values(left.clone()).union(right.clone()),
                |pipeline| black_box(pipeline.execute(&ExecutionContext::new())),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_except(c: &mut Criterion) {
    let mut group = c.benchmark_group("except");

    for size in [100, 1000, 10000].iter() {
        let range = size / 10;
        let left = create_numbers(*size, range, 12345);
        let right = create_numbers(size / 2, range, 67890);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter_batched(
                || Pipeline::from_values(left.clone()).except(right.clone()),
                |pipeline| black_box(pipeline.execute(&ExecutionContext::new())),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Join Benchmarks
// ============================================================================

fn bench_inner_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("inner_join");

    // Smaller sizes for the O(n*m) nested-loop execution
    for size in [100, 500, 1000].iter() {
        let key_range = size / 10; // 10% selectivity
        let left = create_keyed_items(*size, key_range, 12345);
        let right = create_keyed_items(*size, key_range, 67890);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter_batched(
                || {
                    Pipeline::from_values(left.clone())
                        .join(right.clone(), "key", "key", None)
                        .unwrap()
                },
                |pipeline| black_box(pipeline.execute(&ExecutionContext::new())),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_full_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_join");

    for size in [100, 500, 1000].iter() {
        let key_range = size / 5;
        let left = create_keyed_items(*size, key_range, 12345);
        let right = create_keyed_items(*size, key_range, 67890);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter_batched(
                || {
                    Pipeline::from_values(left.clone())
                        .full_join(right.clone(), "key", "key", None)
                        .unwrap()
                },
                |pipeline| black_box(pipeline.execute(&ExecutionContext::new())),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Grouping Benchmarks
// ============================================================================

fn bench_to_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_lookup");

    for size in [100, 1000, 10000].iter() {
        let key_range = size / 10;
        let items = create_keyed_items(*size, key_range, 12345);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter_batched(
                || {
                    Pipeline::from_values(items.clone())
                        .to_lookup(Some(KeySpec::from("key")), None)
                        .unwrap()
                },
                |pipeline| black_box(pipeline.execute(&ExecutionContext::new())),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_union,
    bench_except,
    bench_inner_join,
    bench_full_join,
    bench_to_lookup
);
criterion_main!(benches);
