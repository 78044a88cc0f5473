//! Domain layer for identifier mapping

pub mod config;
pub mod translator;

pub use config::{TranslatorConfig, DEFAULT_CACHE_CAPACITY};
pub use translator::Translator;
