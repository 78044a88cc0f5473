//! # Catalog Bridge Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs      # Seeded gene catalog shared by tests and benches
//! ├── benchmarks/      # Criterion benchmarks per crate
//! │   ├── cb_01_bloom_index.rs
//! │   ├── cb_02_id_mapping.rs
//! │   └── cb_04_detection.rs
//! │
//! └── integration/     # Catalog, detection and translation end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cb-tests
//!
//! # By category
//! cargo test -p cb-tests integration::
//!
//! # Benchmarks
//! cargo bench -p cb-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
