//! Outbound Ports (Driven Ports)
//!
//! The translator depends on a store able to run a stored mapping query.

use shared_types::StoreError;

/// Runs a parameterized mapping query (one `?` placeholder) for one identifier.
///
/// Implementations return every target identifier in result order; an empty
/// vector means the identifier has no mapping.
pub trait MappingStore: Send + Sync {
    fn lookup(&self, query: &str, id: &str) -> Result<Vec<String>, StoreError>;
}
