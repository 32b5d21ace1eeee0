//! Criterion micro-benchmarks for end pushes, random access and
//! positional insert, with `VecDeque` as the baseline.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use segdeque::SegDeque;
use segdeque_bench::{end_choices, filled, random_indices};

const PUSH_COUNT: usize = 100_000;

/// Benchmark: 100K pushes at the back from empty.
fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back_100k");
    group.bench_function("segdeque", |b| {
        b.iter(|| {
            let mut deque: SegDeque<u64> = SegDeque::new();
            for v in 0..PUSH_COUNT as u64 {
                deque.push_back(v);
            }
            black_box(deque.len());
        });
    });
    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for v in 0..PUSH_COUNT as u64 {
                deque.push_back(v);
            }
            black_box(deque.len());
        });
    });
    group.finish();
}

/// Benchmark: 100K pushes split randomly between the two ends.
fn bench_push_mixed(c: &mut Criterion) {
    let choices = end_choices(PUSH_COUNT, 42);
    let mut group = c.benchmark_group("push_mixed_100k");
    group.bench_function("segdeque", |b| {
        b.iter(|| {
            let mut deque: SegDeque<u64> = SegDeque::new();
            for (v, &front) in choices.iter().enumerate() {
                if front {
                    deque.push_front(v as u64);
                } else {
                    deque.push_back(v as u64);
                }
            }
            black_box(deque.len());
        });
    });
    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for (v, &front) in choices.iter().enumerate() {
                if front {
                    deque.push_front(v as u64);
                } else {
                    deque.push_back(v as u64);
                }
            }
            black_box(deque.len());
        });
    });
    group.finish();
}

/// Benchmark: 10K random reads from a 100K-element deque.
fn bench_random_access(c: &mut Criterion) {
    let deque: SegDeque<u64> = filled(PUSH_COUNT);
    let baseline: VecDeque<u64> = deque.iter().copied().collect();
    let indices = random_indices(PUSH_COUNT, 10_000, 7);

    let mut group = c.benchmark_group("random_access_10k");
    group.bench_function("segdeque", |b| {
        b.iter(|| {
            let sum: u64 = indices.iter().map(|&i| deque[i]).sum();
            black_box(sum);
        });
    });
    group.bench_function("vecdeque", |b| {
        b.iter(|| {
            let sum: u64 = indices.iter().map(|&i| baseline[i]).sum();
            black_box(sum);
        });
    });
    group.finish();
}

/// Benchmark: 1K random-position inserts into deques of growing size.
fn bench_positional_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_1k");
    for &len in &[1_000usize, 10_000] {
        let positions = random_indices(len, 1_000, 11);
        group.bench_with_input(BenchmarkId::new("segdeque", len), &len, |b, &len| {
            b.iter(|| {
                let mut deque: SegDeque<u64> = filled(len);
                for (v, &at) in positions.iter().enumerate() {
                    deque.insert(at, v as u64);
                }
                black_box(deque.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("vecdeque", len), &len, |b, &len| {
            b.iter(|| {
                let mut deque: VecDeque<u64> = (0..len as u64).collect();
                for (v, &at) in positions.iter().enumerate() {
                    deque.insert(at, v as u64);
                }
                black_box(deque.len());
            });
        });
    }
    group.finish();
}

/// Benchmark: steady FIFO traffic, which exercises map recentering.
fn bench_queue_traffic(c: &mut Criterion) {
    c.bench_function("queue_traffic_100k", |b| {
        b.iter(|| {
            let mut deque: SegDeque<u64, 16> = filled(64);
            for v in 0..PUSH_COUNT as u64 {
                deque.push_back(v);
                black_box(deque.pop_front());
            }
            black_box(deque.stats().recenterings);
        });
    });
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_mixed,
    bench_random_access,
    bench_positional_insert,
    bench_queue_traffic
);
criterion_main!(benches);
