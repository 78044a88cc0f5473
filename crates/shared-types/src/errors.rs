//! # Error Types
//!
//! Errors surfaced by the backing store adapters.

use thiserror::Error;

/// Errors from the relational store holding sources, indexes and mappings.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached or opened.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A query failed to prepare or execute.
    #[error("Query error: {0}")]
    Query(String),

    /// A row could not be decoded into the expected shape.
    #[error("Row decode error: {0}")]
    Decode(String),
}
