//! # Runtime Container
//!
//! Configuration and the assembled application: store, catalog, detection
//! engine and the two job workers.

pub mod config;
pub mod context;

pub use config::{ConfigError, RuntimeConfig};
pub use context::AppContext;
