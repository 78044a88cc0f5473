//! # CB-04 Detection Benchmarks
//!
//! Ranking a column sample against every subset index of the catalog.

use std::sync::Arc;
use std::time::Duration;

use cb_03_source_catalog::SourceCatalog;
use cb_04_detection::{classify_column, DetectionEngine};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use node_runtime::adapters::SqliteStore;
use node_runtime::RuntimeConfig;

use crate::fixtures::{self, hgnc_id};

const GENES: u64 = 20_000;

fn engine() -> DetectionEngine {
    let store = match SqliteStore::open_in_memory() {
        Ok(store) => Arc::new(store),
        Err(e) => panic!("open failed: {}", e),
    };
    if let Err(e) = fixtures::seed_gene_catalog(&store, GENES) {
        panic!("seed failed: {}", e);
    }
    let config = RuntimeConfig::default().translator();
    match SourceCatalog::load(store.as_ref(), store.clone(), config) {
        Ok(catalog) => DetectionEngine::new(Arc::new(catalog)),
        Err(e) => panic!("catalog load failed: {}", e),
    }
}

pub fn bench_identify(c: &mut Criterion) {
    let mut group = c.benchmark_group("cb-04/identify");
    group.measurement_time(Duration::from_secs(10));
    let engine = engine();

    for size in [100usize, 1_000, 5_000] {
        let samples: Vec<String> = (1..=size as u64).map(hgnc_id).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &samples, |b, samples| {
            b.iter(|| black_box(engine.identify(samples).len()))
        });
    }

    group.finish();
}

pub fn bench_classify_column(c: &mut Criterion) {
    let samples: Vec<String> = (1..=5_000).map(hgnc_id).collect();
    c.bench_function("cb-04/classify_column", |b| {
        b.iter(|| black_box(classify_column(&samples)))
    });
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_identify(c);
    bench_classify_column(c);
}
