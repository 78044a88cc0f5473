//! # Catalog Bridge Pipeline Benchmarks
//!
//! | Crate | Operation | Notes |
//! |-------|-----------|-------|
//! | cb-01 Bloom Index | learn / detect / pack | 75k-element indexes |
//! | cb-02 Id Mapping | cached and evicting lookups | SQLite backed |
//! | cb-04 Detection | identify a column sample | 4 subset indexes |

use cb_tests::benchmarks::{cb_01_bloom_index, cb_02_id_mapping, cb_04_detection};
use criterion::{criterion_group, criterion_main};

criterion_group!(
    benches,
    cb_01_bloom_index::register_benchmarks,
    cb_02_id_mapping::register_benchmarks,
    cb_04_detection::register_benchmarks,
);

criterion_main!(benches);
