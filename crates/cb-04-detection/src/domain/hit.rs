//! Detection hits

use serde::{Deserialize, Serialize};

/// Maximum number of example values kept per hit
pub const EXAMPLE_HIT_SIZE: usize = 10;

/// Hits covering less than this share of the sample are ignored
pub const MIN_SAMPLE_RATIO: f64 = 0.05;

/// How well one subset index of one source matched a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceHit {
    pub source_name: String,
    pub subset: String,
    /// Sample values found in the index, repeats included
    pub hits: u64,
    /// Distinct sample values found in the index
    pub unique_hits: u64,
    /// Size of the tested sample
    pub tested: u64,
    /// `hits / index cardinality`
    pub subset_ratio: f64,
    /// `hits / tested`
    pub sample_ratio: f64,
    /// Estimated false-positive rate of the index
    pub expected_error: f64,
    /// Up to [`EXAMPLE_HIT_SIZE`] distinct matching values, first seen first
    pub examples: Vec<String>,
}

impl SourceHit {
    /// Whether the hit rises above noise: enough of the sample matched, and
    /// more than the index's false-positive rate would explain.
    pub fn is_plausible(&self) -> bool {
        self.sample_ratio >= MIN_SAMPLE_RATIO && self.sample_ratio > self.expected_error
    }
}
