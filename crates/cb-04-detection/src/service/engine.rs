//! Detection engine

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use cb_03_source_catalog::SourceCatalog;

use crate::domain::{SourceHit, EXAMPLE_HIT_SIZE, MIN_SAMPLE_RATIO};

/// Ranks catalogued sources against samples of identifiers.
#[derive(Clone)]
pub struct DetectionEngine {
    catalog: Arc<SourceCatalog>,
}

impl DetectionEngine {
    pub fn new(catalog: Arc<SourceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<SourceCatalog> {
        &self.catalog
    }

    /// Test every sample value against every (source, subset) index.
    ///
    /// Pairs without a single hit are dropped. The result is sorted by hit
    /// count, ties broken by the larger subset ratio.
    pub fn determine_source<S: AsRef<str>>(&self, samples: &[S]) -> Vec<SourceHit> {
        let tested = samples.len() as u64;
        let mut hits = Vec::new();

        for source in self.catalog.sources() {
            for (subset, index) in &source.subsets {
                let mut count = 0u64;
                let mut unique = HashSet::new();
                let mut examples = Vec::new();

                for value in samples {
                    let value = value.as_ref();
                    if !index.contains(value) {
                        continue;
                    }
                    count += 1;
                    if unique.insert(value) && examples.len() < EXAMPLE_HIT_SIZE {
                        examples.push(value.to_string());
                    }
                }
                if count == 0 {
                    continue;
                }

                let cardinality = index.count();
                hits.push(SourceHit {
                    source_name: source.name.clone(),
                    subset: subset.clone(),
                    hits: count,
                    unique_hits: unique.len() as u64,
                    tested,
                    subset_ratio: if cardinality == 0 {
                        0.0
                    } else {
                        count as f64 / cardinality as f64
                    },
                    sample_ratio: count as f64 / tested as f64,
                    expected_error: index.estimated_error_rate(),
                    examples,
                });
            }
        }

        hits.sort_by(|a, b| {
            b.hits
                .cmp(&a.hits)
                .then_with(|| b.subset_ratio.total_cmp(&a.subset_ratio))
        });
        debug!(tested, candidates = hits.len(), "Ranked sources");
        hits
    }

    /// Reduce a ranking from [`determine_source`](Self::determine_source) to
    /// at most one plausible hit per source.
    ///
    /// Scanning stops at the first hit whose subset ratio falls below half of
    /// the top hit's. Hits covering under 5% of the sample, or no more than
    /// the index's false-positive rate, are skipped. Per source the hit with
    /// the larger sample ratio is kept.
    pub fn classify(hits: &[SourceHit]) -> BTreeMap<String, SourceHit> {
        let mut result: BTreeMap<String, SourceHit> = BTreeMap::new();
        let Some(first) = hits.first() else {
            return result;
        };
        let threshold = first.subset_ratio / 2.0;

        for (i, hit) in hits.iter().enumerate() {
            if i > 0 && hit.subset_ratio < threshold {
                break;
            }
            if hit.sample_ratio < MIN_SAMPLE_RATIO || hit.sample_ratio <= hit.expected_error {
                continue;
            }
            let replace = result
                .get(&hit.source_name)
                .map_or(true, |old| old.sample_ratio < hit.sample_ratio);
            if replace {
                result.insert(hit.source_name.clone(), hit.clone());
            }
        }
        result
    }

    /// Rank and classify a sample in one call.
    pub fn identify<S: AsRef<str>>(&self, samples: &[S]) -> BTreeMap<String, SourceHit> {
        Self::classify(&self.determine_source(samples))
    }
}
