//! Counters for translator cache behaviour
//!
//! ```ignore
//! let snapshot = translator.metrics().snapshot();
//! println!("hit rate {:.1}%", snapshot.hit_rate() * 100.0);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for one translator
#[derive(Debug, Default)]
pub struct TranslatorMetrics {
    /// Lookups answered from the cache, confirmed misses included
    pub cache_hits: AtomicU64,
    /// Lookups that had to go to the store
    pub cache_misses: AtomicU64,
    /// Store queries that completed
    pub store_queries: AtomicU64,
    /// Store queries that failed
    pub store_errors: AtomicU64,
}

impl TranslatorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query(&self, ok: bool) {
        if ok {
            self.store_queries.fetch_add(1, Ordering::Relaxed);
        } else {
            self.store_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> TranslatorMetricsSnapshot {
        TranslatorMetricsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            store_queries: self.store_queries.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`TranslatorMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TranslatorMetricsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub store_queries: u64,
    pub store_errors: u64,
}

impl TranslatorMetricsSnapshot {
    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
