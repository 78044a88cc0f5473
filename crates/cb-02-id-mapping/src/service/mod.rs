//! Service layer

pub mod translator_pool;

pub use translator_pool::TranslatorPool;
