//! Cached translator for one mapping query

use lru::LruCache;
use parking_lot::RwLock;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::config::TranslatorConfig;
use crate::metrics::TranslatorMetrics;
use crate::ports::MappingStore;

/// Translates identifiers through one stored mapping query.
///
/// The cache maps a source identifier to its ordered target identifiers. An
/// empty list is a confirmed miss and is distinct from an absent entry.
pub struct Translator {
    query: String,
    store: Arc<dyn MappingStore>,
    cache: RwLock<LruCache<String, Vec<String>>>,
    metrics: TranslatorMetrics,
}

impl Translator {
    pub fn new(
        query: impl Into<String>,
        store: Arc<dyn MappingStore>,
        config: &TranslatorConfig,
    ) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            query: query.into(),
            store,
            cache: RwLock::new(LruCache::new(capacity)),
            metrics: TranslatorMetrics::new(),
        }
    }

    /// Look up the targets of `id`. `None` means not found.
    ///
    /// Concurrent callers may both query the store for the same cold key; the
    /// second insert simply overwrites the first with the same answer.
    pub fn get(&self, id: &str) -> Option<Vec<String>> {
        if let Some(cached) = self.cached(id) {
            self.metrics.record_hit();
            return if cached.is_empty() { None } else { Some(cached) };
        }
        self.metrics.record_miss();

        // No lock is held while the store runs the query.
        let rows = match self.store.lookup(&self.query, id) {
            Ok(rows) => {
                self.metrics.record_query(true);
                rows
            }
            Err(e) => {
                self.metrics.record_query(false);
                warn!(id, query = %self.query, error = %e, "Mapping lookup failed");
                return None;
            }
        };

        self.cache.write().put(id.to_string(), rows.clone());
        if rows.is_empty() {
            debug!(id, "No mapping, caching miss");
            None
        } else {
            Some(rows)
        }
    }

    fn cached(&self, id: &str) -> Option<Vec<String>> {
        let hit = self.cache.read().peek(id).cloned()?;
        // Refresh recency only when nobody else holds the lock.
        if let Some(mut cache) = self.cache.try_write() {
            cache.promote(id);
        }
        Some(hit)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of cached identifiers, confirmed misses included
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn capacity(&self) -> usize {
        self.cache.read().cap().get()
    }

    pub fn metrics(&self) -> &TranslatorMetrics {
        &self.metrics
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("query", &self.query)
            .field("cached", &self.cached_len())
            .finish()
    }
}
