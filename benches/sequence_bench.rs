//! Sequence container benchmarks
//!
//! Compares sorted insertion and lookup against a plain `Vec` kept sorted
//! with `binary_search`, and linked push/remove against `VecDeque`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ordseq::{LinkedSeq, OrderedSeq};
use rand::prelude::*;
use std::collections::VecDeque;

const SIZES: &[usize] = &[100, 1000, 10000];

fn random_keys(n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| rng.gen()).collect()
}

fn bench_sorted_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_insert");

    for &size in SIZES {
        let keys = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ordered_seq", size), &keys, |b, keys| {
            b.iter(|| {
                let mut seq = OrderedSeq::new();
                for &k in keys {
                    black_box(seq.append(k));
                }
                seq
            });
        });

        group.bench_with_input(BenchmarkId::new("vec_binary_search", size), &keys, |b, keys| {
            b.iter(|| {
                let mut vec = Vec::with_capacity(256);
                for &k in keys {
                    let pos = vec.binary_search(&k).unwrap_or_else(|p| p);
                    vec.insert(pos, k);
                }
                vec
            });
        });
    }

    group.finish();
}

fn bench_sorted_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorted_search");

    for &size in SIZES {
        let keys = random_keys(size);
        let seq: OrderedSeq<u64> = keys.iter().copied().collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ordered_seq", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(seq.search(k));
                }
            });
        });
    }

    group.finish();
}

fn bench_linked_push_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("linked_push_remove");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("linked_seq", size), &size, |b, &size| {
            b.iter(|| {
                let mut seq = LinkedSeq::new();
                let handles: Vec<_> = (0..size).map(|i| seq.push_back(i)).collect();
                for handle in handles.into_iter().step_by(2) {
                    black_box(seq.remove(handle));
                }
                seq
            });
        });

        group.bench_with_input(BenchmarkId::new("vecdeque", size), &size, |b, &size| {
            b.iter(|| {
                let mut deque: VecDeque<usize> = (0..size).collect();
                while let Some(v) = deque.pop_front() {
                    black_box(v);
                }
                deque
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sorted_insert,
    bench_sorted_search,
    bench_linked_push_remove
);
criterion_main!(benches);
