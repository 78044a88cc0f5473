//! # Storage Adapters
//!
//! SQLite is used for:
//! - The source catalog (`sources`, `source_indexes`, `source_mappings`)
//! - The per-pair cross-reference tables behind each mapping query

pub mod sqlite;

pub use sqlite::SqliteStore;
