mod common;

use common::NullSink;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use prodcon::prelude::*;

/// Benchmark end-to-end throughput across worker/buffer shapes
fn bench_pipeline_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_shapes");
    let runs = 20_000u64;
    group.throughput(Throughput::Elements(runs));

    for (producers, consumers, buffer_size) in [(1, 1, 1), (1, 1, 64), (4, 3, 10), (8, 8, 64)] {
        let label = format!("p{}_c{}_b{}", producers, consumers, buffer_size);
        let config = PipelineConfig::new(producers, consumers, buffer_size, runs).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(label), &config, |b, &config| {
            b.iter(|| {
                let results = Pipeline::new(config, LockedAccumulator::new(), NullSink)
                    .with_sources(|id| RandomSource::seeded(u64::from(id)))
                    .run()
                    .unwrap();
                black_box(results.global.total())
            });
        });
    }

    group.finish();
}

/// Benchmark how the global backend affects a wide pipeline
fn bench_pipeline_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_backends");
    let runs = 20_000u64;
    group.throughput(Throughput::Elements(runs));
    let config = PipelineConfig::new(8, 8, 32, runs).unwrap();

    group.bench_function("locked", |b| {
        b.iter(|| {
            let results = Pipeline::new(config, LockedAccumulator::new(), NullSink)
                .run()
                .unwrap();
            black_box(results.global.records())
        });
    });

    group.bench_function("sharded", |b| {
        b.iter(|| {
            let results = Pipeline::new(config, ConcurrentAccumulator::new(), NullSink)
                .run()
                .unwrap();
            black_box(results.global.records())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline_shapes, bench_pipeline_backends);
criterion_main!(benches);
