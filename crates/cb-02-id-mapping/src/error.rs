//! Error types for identifier mapping

use thiserror::Error;

/// Configuration errors for translators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Cache capacity must be at least 1, got {capacity}")]
    InvalidCapacity { capacity: usize },

    #[error("Mapping query template is empty")]
    EmptyQuery,
}
