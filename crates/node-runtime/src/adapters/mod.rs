//! # Adapter Implementations
//!
//! Concrete implementations of the outbound ports of the catalog and mapping
//! crates, plus the file-system adapters used by the job workers.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  SqliteStore ── implements ──→ CatalogStore, MappingStore     │
//! │  RecordReader ── reads ──→ uploaded CSV / TSV inputs          │
//! │  ResultStore ── persists ──→ JobOutcome<T> per job token      │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod formats;
pub mod result_store;
pub mod storage;

pub use formats::{FormatError, InputFormat, RecordReader};
pub use result_store::{ResultStore, ResultStoreError};
pub use storage::SqliteStore;
