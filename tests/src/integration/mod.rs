//! # Integration Tests
//!
//! Catalog, detection and translation working together over a real SQLite
//! database.

pub mod flows;
pub mod jobs;
