//! # Catalog Bridge Benchmarks
//!
//! Criterion benchmarks per crate, registered from
//! `benches/pipeline_benchmarks.rs`.

pub mod cb_01_bloom_index;
pub mod cb_04_detection;
