//! # CB-01 Bloom Index Benchmarks
//!
//! - Learning and membership tests at catalog-sized capacities
//! - Pack/unpack of a full index, as done once per subset at startup

use cb_01_bloom_index::BloomIndex;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;

fn random_ids(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| format!("ID:{}", rng.gen_range(0..10_000_000u32)))
        .collect()
}

fn filled(capacity: usize) -> (BloomIndex, Vec<String>) {
    let ids = random_ids(capacity);
    let mut index = BloomIndex::new();
    index.advise(capacity);
    for id in &ids {
        index.learn(id);
    }
    (index, ids)
}

pub fn bench_learn(c: &mut Criterion) {
    let mut group = c.benchmark_group("cb-01/learn");
    group.measurement_time(Duration::from_secs(5));

    for capacity in [1_000, 75_000] {
        let ids = random_ids(capacity);
        group.throughput(Throughput::Elements(capacity as u64));
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &ids, |b, ids| {
            b.iter(|| {
                let mut index = BloomIndex::new();
                index.advise(ids.len());
                for id in ids {
                    index.learn(id);
                }
                black_box(index.count())
            })
        });
    }

    group.finish();
}

pub fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("cb-01/detect");

    let (index, ids) = filled(75_000);
    let misses = random_ids(1_000);
    group.bench_function("hit", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % ids.len();
            black_box(index.detect(&ids[i]))
        })
    });
    group.bench_function("miss", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % misses.len();
            black_box(index.contains(&misses[i]))
        })
    });

    group.finish();
}

pub fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("cb-01/codec");
    group.measurement_time(Duration::from_secs(10));

    let (index, _) = filled(75_000);
    let packed = match index.pack() {
        Ok(packed) => packed,
        Err(e) => panic!("pack failed: {}", e),
    };
    group.throughput(Throughput::Bytes(packed.len() as u64));

    group.bench_function("pack", |b| b.iter(|| black_box(index.pack().is_ok())));
    group.bench_function("unpack", |b| {
        b.iter(|| black_box(BloomIndex::unpack(&packed).is_ok()))
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_learn(c);
    bench_detect(c);
    bench_codec(c);
}
