//! # Shared Types Crate
//!
//! Types shared across the Catalog Bridge crates.
//!
//! ## Contents
//!
//! - **Entities**: `IdentifierKind`, `FieldInfo`, tabular `Record`
//! - **Jobs**: `JobToken`, the tagged `JobOutcome<T>` result envelope and
//!   the polled `JobStatus<T>`
//! - **Errors**: `StoreError` for the backing relational store

pub mod entities;
pub mod errors;
pub mod jobs;

pub use entities::*;
pub use errors::*;
pub use jobs::*;
