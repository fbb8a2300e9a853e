//! Criterion benchmarks for shuffled queue operations.
//!
//! Run with: cargo bench
//! Results saved to: target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use shuffled_queue::ShuffledPriorityQueue;

/// Build a queue of `n` integers spread over `tiers` priorities.
fn filled(n: u64, tiers: i64) -> ShuffledPriorityQueue<u64> {
    let mut spq = ShuffledPriorityQueue::with_seed("bench");
    for i in 0..n {
        spq.add_with_priority(i, i as i64 % tiers);
    }
    spq
}

/// Benchmark queue construction.
fn bench_new(c: &mut Criterion) {
    c.bench_function("spq_new", |b| {
        b.iter(|| ShuffledPriorityQueue::<u64>::with_seed(black_box("bench")))
    });
}

/// Benchmark add at the default priority and at distinct priorities.
fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("spq_add");
    group.throughput(Throughput::Elements(1));

    group.bench_function("default_priority", |b| {
        let mut spq = ShuffledPriorityQueue::with_seed("bench");
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            spq.add(black_box(i));
        })
    });

    group.bench_function("distinct_priority", |b| {
        let mut spq = ShuffledPriorityQueue::with_seed("bench");
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            spq.add_with_priority(black_box(i), i as i64);
        })
    });

    group.finish();
}

/// Benchmark remove on empty, missing and present elements.
fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("spq_remove");

    group.bench_function("when_empty", |b| {
        let mut spq: ShuffledPriorityQueue<&str> = ShuffledPriorityQueue::with_seed("bench");
        b.iter(|| spq.remove(black_box("hello")))
    });

    group.bench_function("when_missing", |b| {
        let mut spq = ShuffledPriorityQueue::with_seed("bench");
        spq.add_with_priority("welt", 0);
        b.iter(|| spq.remove(black_box("hello")))
    });

    group.bench_function("when_present", |b| {
        let mut spq = ShuffledPriorityQueue::with_seed("bench");
        spq.add_with_priority("welt", 0);
        b.iter(|| {
            spq.add_with_priority("hello", 1);
            spq.remove(black_box("hello"))
        })
    });

    group.finish();
}

/// Benchmark draining a filled queue from both ends.
fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("spq_drain");

    for tiers in [1i64, 16, 256] {
        group.throughput(Throughput::Elements(1_000));
        group.bench_with_input(BenchmarkId::new("shift", tiers), &tiers, |b, &tiers| {
            b.iter_batched(
                || filled(1_000, tiers),
                |mut spq| while spq.shift().is_some() {},
                criterion::BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("pop", tiers), &tiers, |b, &tiers| {
            b.iter_batched(
                || filled(1_000, tiers),
                |mut spq| while spq.pop().is_some() {},
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_new, bench_add, bench_remove, bench_drain);
criterion_main!(benches);
