//! # Application Context
//!
//! Built once at startup, in dependency order:
//!
//! ```text
//! RuntimeConfig → SqliteStore → SourceCatalog → DetectionEngine
//!                                     │                │
//!                                     ↓                ↓
//!                           TranslationJobs      DetectionJobs
//! ```
//!
//! Both workers are running by the time [`AppContext::start`] returns.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use cb_03_source_catalog::SourceCatalog;
use cb_04_detection::DetectionEngine;

use crate::adapters::{ResultStore, SqliteStore};
use crate::container::config::RuntimeConfig;
use crate::handlers::{DetectionJobs, DetectionWorker, TranslationJobs, TranslationWorker};

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppContext {
    config: Arc<RuntimeConfig>,
    catalog: Arc<SourceCatalog>,
    detection: DetectionJobs,
    translation: TranslationJobs,
}

impl AppContext {
    /// Load the catalog and start the job workers.
    ///
    /// Any failure here is fatal: there is nothing useful to serve without
    /// a catalog.
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        config
            .ensure_directories()
            .context("unable to create working directories")?;
        let config = Arc::new(config);

        info!("Phase 1: Opening source database");
        let store = Arc::new(
            SqliteStore::open(&config.database)
                .with_context(|| format!("unable to open {}", config.database.display()))?,
        );

        info!("Phase 2: Loading source catalog");
        let catalog = SourceCatalog::load(store.as_ref(), store.clone(), config.translator())
            .context("unable to load source catalog")?;
        let catalog = Arc::new(catalog);
        info!(
            sources = catalog.len(),
            directives = catalog.directives().len(),
            "  Catalog ready"
        );

        info!("Phase 3: Starting job workers");
        let results = ResultStore::new(&config.result_dir);
        let engine = DetectionEngine::new(Arc::clone(&catalog));
        let detection = DetectionJobs::spawn(
            DetectionWorker::new(engine, Arc::clone(&config), results.clone()),
            config.queue_capacity,
        );
        let translation = TranslationJobs::spawn(
            TranslationWorker::new(Arc::clone(&catalog), Arc::clone(&config), results),
            config.queue_capacity,
        );

        info!("Runtime ready");
        Ok(Self {
            config,
            catalog,
            detection,
            translation,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<SourceCatalog> {
        &self.catalog
    }

    pub fn detector(&self) -> &DetectionJobs {
        &self.detection
    }

    pub fn translator_jobs(&self) -> &TranslationJobs {
        &self.translation
    }
}
