//! Error types for the source catalog

use cb_01_bloom_index::IndexError;
use cb_02_id_mapping::MappingError;
use shared_types::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// No directive links the two sources in either direction.
    #[error("No supported mapping from '{from}' to '{to}'")]
    NoSupportedMapping { from: String, to: String },

    #[error("Unknown source '{0}'")]
    UnknownSource(String),

    /// A directive row references a source id that was not loaded.
    #[error("Mapping directive references unknown source id {0}")]
    DanglingDirective(i64),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Index '{subset}' of source '{source_name}' is unreadable: {error}")]
    Index {
        source_name: String,
        subset: String,
        #[source]
        error: IndexError,
    },

    #[error("Translator error: {0}")]
    Mapping(#[from] MappingError),
}
