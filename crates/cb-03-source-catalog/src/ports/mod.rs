//! Ports for the catalog

pub mod outbound;

pub use outbound::{CatalogStore, DirectiveRow, IndexRow, SourceRow};
