//! Service layer

pub mod catalog;

pub use catalog::SourceCatalog;
