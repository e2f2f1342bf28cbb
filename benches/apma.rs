use apma::APMA;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::prelude::*;
use std::collections::BTreeMap;

fn shuffled_keys(size: u64) -> Vec<u64> {
    let mut keys = (1..=size).collect::<Vec<_>>();
    keys.shuffle(&mut StdRng::seed_from_u64(42));
    keys
}

/// Fills an empty structure, in ascending and in random key order.
fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill");

    for size in [1_000u64, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("APMA_sequential", size), &size, |b, &size| {
            b.iter(|| {
                let mut apma = APMA::new();
                for key in 1..=size {
                    apma.insert(key, ()).unwrap();
                }
                black_box(apma.len())
            });
        });

        let keys = shuffled_keys(size);

        group.bench_with_input(BenchmarkId::new("APMA_random", size), &keys, |b, keys| {
            b.iter(|| {
                let mut apma = APMA::new();
                for &key in keys {
                    apma.insert(key, ()).unwrap();
                }
                black_box(apma.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap_random", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &key in keys {
                    map.insert(key, ());
                }
                black_box(map.len())
            });
        });
    }

    group.finish();
}

/// Point lookups in a populated structure.
fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");

    for size in [1_000u64, 100_000] {
        let mut apma = APMA::new();
        for key in shuffled_keys(size) {
            apma.insert(key * 2, key).unwrap();
        }
        let probes = shuffled_keys(size * 2);

        group.bench_function(BenchmarkId::new("APMA", size), |b| {
            let mut probe = probes.iter().cycle();
            b.iter(|| black_box(apma.find(probe.next().unwrap_or(&1))));
        });
    }

    group.finish();
}

/// Drains a populated structure, down to a single segment.
fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");

    for size in [1_000u64, 10_000] {
        let keys = shuffled_keys(size);

        group.bench_with_input(BenchmarkId::new("APMA_random", size), &keys, |b, keys| {
            b.iter_batched(
                || {
                    let mut apma = APMA::new();
                    for &key in keys {
                        apma.insert(key, ()).unwrap();
                    }
                    apma
                },
                |mut apma| {
                    for key in keys {
                        apma.delete(key).unwrap();
                    }
                    black_box(apma.capacity())
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fill, bench_find, bench_drain);
criterion_main!(benches);
