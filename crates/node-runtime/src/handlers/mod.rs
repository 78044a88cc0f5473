//! # Job Handlers
//!
//! Detection and translation jobs. Each kind has its own sequential worker;
//! submitters get a token back immediately and poll the result store.

pub mod detection;
pub mod error;
pub mod provenance;
pub mod translation;
mod worker;

pub use detection::{DetectionJobs, DetectionReport, DetectionWorker, DETECTION_KIND};
pub use error::{JobError, SubmitError};
pub use translation::{
    TranslateOptions, TranslationJobs, TranslationReport, TranslationStats, TranslationWorker,
    MAPPING_KIND,
};
