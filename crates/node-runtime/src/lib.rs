//! # Catalog Bridge Runtime Library
//!
//! The runtime wiring behind the `node-runtime` binary: storage and file
//! adapters, the application container, and the detection and translation
//! job handlers.

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod handlers;

pub use container::{AppContext, RuntimeConfig};
pub use handlers::{DetectionJobs, JobError, TranslateOptions, TranslationJobs};
