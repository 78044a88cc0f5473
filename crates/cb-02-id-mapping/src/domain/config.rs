//! Translator configuration

use crate::error::MappingError;
use serde::{Deserialize, Serialize};

/// Default number of cached identifiers per translator
pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;

/// Translator configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Maximum cached identifiers, confirmed misses included
    pub cache_capacity: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl TranslatorConfig {
    pub fn with_capacity(cache_capacity: usize) -> Result<Self, MappingError> {
        let config = Self { cache_capacity };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MappingError> {
        if self.cache_capacity == 0 {
            return Err(MappingError::InvalidCapacity {
                capacity: self.cache_capacity,
            });
        }
        Ok(())
    }
}
