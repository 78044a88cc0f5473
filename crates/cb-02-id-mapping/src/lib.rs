//! # CB-02 Identifier Mapping
//!
//! Cached one-hop identifier translation between two catalogued sources.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`)
//!   - `Translator`: bounded LRU cache in front of one parameterized mapping query
//!   - `TranslatorConfig`: cache sizing
//!
//! - **Ports Layer** (`ports/`)
//!   - `MappingStore`: driven port that runs a mapping query for one identifier
//!
//! - **Service Layer** (`service/`)
//!   - `TranslatorPool`: one shared `Translator` per query template
//!
//! ## Lookup
//!
//! A lookup first peeks the cache under a shared lock. On a miss the store is
//! queried with no lock held and the answer is inserted under the exclusive
//! lock. An empty answer is cached too, so a confirmed miss never reaches the
//! store twice. Store failures are logged and reported as "not found" without
//! being cached.
//!
//! ```ignore
//! use cb_02_id_mapping::{TranslatorConfig, TranslatorPool};
//!
//! let pool = TranslatorPool::new(store, TranslatorConfig::default());
//! let translator = pool.translator("SELECT entrez FROM xref_hgnc_entrez WHERE hgnc = ?");
//! if let Some(targets) = translator.get("HGNC:11998") {
//!     println!("{}", targets.join("|"));
//! }
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{Translator, TranslatorConfig, DEFAULT_CACHE_CAPACITY};
pub use error::MappingError;
pub use metrics::{TranslatorMetrics, TranslatorMetricsSnapshot};
pub use ports::MappingStore;
pub use service::TranslatorPool;
