//! Outbound Ports (Driven Ports)
//!
//! Raw rows as stored in the `sources`, `source_indexes` and
//! `source_mappings` tables.

use shared_types::StoreError;

/// One row of the `sources` table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceRow {
    pub source_id: i64,
    pub name: String,
    pub description: String,
    pub ident_type: String,
    pub url: String,
    /// Linkout template with one `%s` placeholder
    pub id_url: String,
    /// RIS citation metadata
    pub citedata: String,
}

/// One row of the `source_indexes` table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexRow {
    pub subset: String,
    /// Packed bloom index
    pub bloom: Vec<u8>,
    pub last_update: String,
    pub element_count: u64,
}

/// One row of the `source_mappings` table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveRow {
    pub left_source_id: i64,
    pub right_source_id: i64,
    pub map_query_lr: String,
    pub map_query_rl: String,
    pub last_update: String,
    pub element_count: u64,
}

/// Read access to the catalog tables
pub trait CatalogStore: Send + Sync {
    fn load_sources(&self) -> Result<Vec<SourceRow>, StoreError>;

    fn load_indexes(&self, source_id: i64) -> Result<Vec<IndexRow>, StoreError>;

    fn load_directives(&self) -> Result<Vec<DirectiveRow>, StoreError>;
}
