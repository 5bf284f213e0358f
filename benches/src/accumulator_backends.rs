mod common;

use std::sync::Arc;
use std::thread;

use common::generate_records;
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use prodcon::prelude::*;

/// Benchmark single-threaded folding into a plain accumulator
fn bench_local_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_fold");

    for num_records in [1_000, 10_000, 100_000] {
        let records = generate_records(num_records, 8, 1);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_records),
            &records,
            |b, records| {
                b.iter(|| {
                    let acc: Accumulator = records.iter().collect();
                    black_box(acc)
                });
            },
        );
    }

    group.finish();
}

/// Fold the same records from `threads` threads into one shared backend
fn contended_fold<S: SharedAccumulator + 'static>(
    backend: Arc<S>,
    records: &Arc<Vec<SalesRecord>>,
    threads: usize,
) -> Accumulator {
    let chunk = records.len().div_ceil(threads);
    let workers: Vec<_> = (0..threads)
        .map(|t| {
            let backend = Arc::clone(&backend);
            let records = Arc::clone(records);
            thread::spawn(move || {
                let start = (t * chunk).min(records.len());
                let end = ((t + 1) * chunk).min(records.len());
                for record in &records[start..end] {
                    backend.fold(record);
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }
    backend.snapshot()
}

/// Benchmark the locked and sharded backends under thread contention
fn bench_shared_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_fold");
    let records = Arc::new(generate_records(50_000, 16, 2));

    for threads in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("locked", threads), &threads, |b, &threads| {
            b.iter_batched(
                || Arc::new(LockedAccumulator::new()),
                |backend| black_box(contended_fold(backend, &records, threads)),
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("sharded", threads), &threads, |b, &threads| {
            b.iter_batched(
                || Arc::new(ConcurrentAccumulator::new()),
                |backend| black_box(contended_fold(backend, &records, threads)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_local_fold, bench_shared_fold);
criterion_main!(benches);
