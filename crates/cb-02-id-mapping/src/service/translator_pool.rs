//! Translator pool
//!
//! Hands out one shared [`Translator`] per query template, so every caller
//! translating in the same direction shares one cache.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::domain::{Translator, TranslatorConfig};
use crate::error::MappingError;
use crate::ports::MappingStore;

pub struct TranslatorPool {
    store: Arc<dyn MappingStore>,
    config: TranslatorConfig,
    translators: Mutex<HashMap<String, Arc<Translator>>>,
}

impl TranslatorPool {
    pub fn new(store: Arc<dyn MappingStore>, config: TranslatorConfig) -> Self {
        Self {
            store,
            config,
            translators: Mutex::new(HashMap::new()),
        }
    }

    /// Return the translator for `query`, creating it on first use.
    pub fn translator(&self, query: &str) -> Result<Arc<Translator>, MappingError> {
        if query.trim().is_empty() {
            return Err(MappingError::EmptyQuery);
        }
        let mut translators = self.translators.lock();
        if let Some(existing) = translators.get(query) {
            return Ok(Arc::clone(existing));
        }
        let translator = Arc::new(Translator::new(query, Arc::clone(&self.store), &self.config));
        translators.insert(query.to_string(), Arc::clone(&translator));
        info!(
            capacity = self.config.cache_capacity,
            pooled = translators.len(),
            "Created translator"
        );
        Ok(translator)
    }

    /// Number of translators created so far
    pub fn len(&self) -> usize {
        self.translators.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }
}
