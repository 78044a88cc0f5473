//! Source catalog service

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

use cb_01_bloom_index::BloomIndex;
use cb_02_id_mapping::{MappingStore, Translator, TranslatorConfig, TranslatorPool};
use shared_types::IdentifierKind;

use crate::domain::{parse_timestamp, MappingDirective, Source};
use crate::error::CatalogError;
use crate::ports::CatalogStore;

/// Read-only catalog of sources and the directives between them.
pub struct SourceCatalog {
    sources: BTreeMap<String, Source>,
    directives: Vec<MappingDirective>,
    /// from name -> to name -> query template
    adjacency: BTreeMap<String, BTreeMap<String, String>>,
    translators: TranslatorPool,
}

impl SourceCatalog {
    /// Load the whole catalog from `store`.
    ///
    /// Any unreadable row or undecodable index aborts the load.
    pub fn load(
        store: &dyn CatalogStore,
        mapping_store: Arc<dyn MappingStore>,
        config: TranslatorConfig,
    ) -> Result<Self, CatalogError> {
        let mut sources = BTreeMap::new();

        for row in store.load_sources()? {
            let mut source = Source::new(row.source_id, row.name);
            source.description = row.description;
            source.kind = IdentifierKind::from_label(&row.ident_type);
            source.url = row.url;
            source.id_url = row.id_url;
            source.citation = row.citedata;

            for index_row in store.load_indexes(source.id)? {
                let index = BloomIndex::unpack(&index_row.bloom).map_err(|error| {
                    CatalogError::Index {
                        source_name: source.name.clone(),
                        subset: index_row.subset.clone(),
                        error,
                    }
                })?;
                debug!(
                    source = %source.name,
                    subset = %index_row.subset,
                    elements = index.count(),
                    "Loaded subset index"
                );
                source.add_subset(index_row.subset, index, parse_timestamp(&index_row.last_update));
            }

            sources.insert(source.name.clone(), source);
        }

        let directives = store
            .load_directives()?
            .into_iter()
            .map(|row| MappingDirective {
                left_id: row.left_source_id,
                right_id: row.right_source_id,
                query_lr: row.map_query_lr,
                query_rl: row.map_query_rl,
                element_count: row.element_count,
                last_update: parse_timestamp(&row.last_update),
            })
            .collect();

        let catalog = Self::from_parts(sources.into_values(), directives, mapping_store, config)?;
        info!(
            sources = catalog.sources.len(),
            directives = catalog.directives.len(),
            "Source catalog loaded"
        );
        Ok(catalog)
    }

    /// Assemble a catalog from already decoded sources and directives.
    pub fn from_parts(
        sources: impl IntoIterator<Item = Source>,
        directives: Vec<MappingDirective>,
        mapping_store: Arc<dyn MappingStore>,
        config: TranslatorConfig,
    ) -> Result<Self, CatalogError> {
        let sources: BTreeMap<String, Source> =
            sources.into_iter().map(|s| (s.name.clone(), s)).collect();
        let names_by_id: HashMap<i64, &str> =
            sources.values().map(|s| (s.id, s.name.as_str())).collect();

        let mut adjacency: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for directive in &directives {
            let left = *names_by_id
                .get(&directive.left_id)
                .ok_or(CatalogError::DanglingDirective(directive.left_id))?;
            let right = *names_by_id
                .get(&directive.right_id)
                .ok_or(CatalogError::DanglingDirective(directive.right_id))?;

            adjacency
                .entry(left.to_string())
                .or_default()
                .insert(right.to_string(), directive.query_lr.clone());
            adjacency
                .entry(right.to_string())
                .or_default()
                .insert(left.to_string(), directive.query_rl.clone());
        }

        Ok(Self {
            sources,
            directives,
            adjacency,
            translators: TranslatorPool::new(mapping_store, config),
        })
    }

    /// All sources, ordered by name
    pub fn sources(&self) -> impl Iterator<Item = &Source> {
        self.sources.values()
    }

    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.get(name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn directives(&self) -> &[MappingDirective] {
        &self.directives
    }

    /// Sources reachable from `source_name` through one directive, sorted by name.
    pub fn mappings(&self, source_name: &str) -> Vec<String> {
        self.adjacency
            .get(source_name)
            .map(|targets| targets.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The shared translator for mapping `from` identifiers to `to`.
    pub fn get_translator(&self, from: &str, to: &str) -> Result<Arc<Translator>, CatalogError> {
        let query = self
            .adjacency
            .get(from)
            .and_then(|targets| targets.get(to))
            .ok_or_else(|| CatalogError::NoSupportedMapping {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        Ok(self.translators.translator(query)?)
    }

    /// Number of translators built so far
    pub fn translator_count(&self) -> usize {
        self.translators.len()
    }
}
