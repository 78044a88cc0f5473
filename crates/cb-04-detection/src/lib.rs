//! # CB-04 Source Detection
//!
//! Guesses which catalogued source a column of identifiers came from by
//! testing a sample against every subset bloom index.
//!
//! - `DetectionEngine::determine_source` ranks every (source, subset) pair
//!   that matched at least one sample value.
//! - `DetectionEngine::classify` reduces that ranking to at most one
//!   plausible hit per source.
//! - `classify_column` types a column as integers, floats, prefixed
//!   integers or text.
//!
//! The output is heuristic and meant to be reviewed by a person.

pub mod domain;
pub mod service;

pub use domain::{classify_column, SourceHit, EXAMPLE_HIT_SIZE, MIN_SAMPLE_RATIO};
pub use service::DetectionEngine;
