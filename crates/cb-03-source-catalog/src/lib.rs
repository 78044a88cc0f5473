//! # CB-03 Source Catalog
//!
//! In-memory catalog of identifier sources, their subset indexes and the
//! mapping directives between them.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`)
//!   - `Source`: one identifier source with its subset bloom indexes
//!   - `MappingDirective`: a stored pair of mapping queries between two sources
//!
//! - **Ports Layer** (`ports/`)
//!   - `CatalogStore`: driven port that reads source, index and directive rows
//!
//! - **Service Layer** (`service/`)
//!   - `SourceCatalog`: loaded once, read-only afterwards; resolves translators
//!
//! ## Loading
//!
//! The catalog is built in a single pass: sources, then each source's
//! subset indexes (unpacked), then the directive table. Any row that cannot
//! be read or decoded aborts the load.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::{parse_timestamp, MappingDirective, Source, SourceInfo};
pub use error::CatalogError;
pub use ports::{CatalogStore, DirectiveRow, IndexRow, SourceRow};
pub use service::SourceCatalog;
