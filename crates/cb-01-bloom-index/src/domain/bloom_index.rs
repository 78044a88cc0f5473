//! Core bloom index implementation
//!
//! INVARIANTS:
//! - No false negatives: if learned, `detect()` MUST report present
//! - `m` and `k` are fixed once the first value is learned

use std::fmt;

use bitvec::prelude::*;

use super::hash_functions::probe_positions;
use super::parameters::{calculate_fpr, calculate_optimal_parameters, optimal_k};
use crate::error::IndexError;

/// Default expected number of elements when only an error rate is given
pub const DEFAULT_ADVISE_SIZE: usize = 75_000;

/// Default target error rate when only an expected size is given (1%)
pub const DEFAULT_ERROR_RATE: f64 = 0.01;

/// Probabilistic membership index for one identifier set
///
/// The question "is X in the set?" has the answers "no" and "maybe". To keep
/// the error bound meaningful the advised size should not be smaller than
/// the number of values learned.
#[derive(Clone, Debug)]
pub struct BloomIndex {
    /// Bit array, stored as 64-bit words
    pub(crate) bits: BitVec<u64, Lsb0>,
    /// Size in bits (m)
    pub(crate) m: usize,
    /// Number of hash probes (k)
    pub(crate) k: usize,
    /// Number of values learned (n)
    pub(crate) n: u64,
    /// Expected element count used for sizing
    advised: usize,
    /// Target error rate used for sizing
    target_error: f64,
}

impl Default for BloomIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl BloomIndex {
    /// Create an unsized index
    ///
    /// The index is sized on the first call to [`advise`](Self::advise),
    /// [`set_error_rate`](Self::set_error_rate) or [`learn`](Self::learn).
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
            m: 0,
            k: 0,
            n: 0,
            advised: 0,
            target_error: 0.0,
        }
    }

    /// Create an index sized for `expected` values at `error_rate`
    pub fn with_capacity(expected: usize, error_rate: f64) -> Result<Self, IndexError> {
        let mut index = Self::new();
        index.set_error_rate(error_rate)?;
        index.advise(expected);
        Ok(index)
    }

    /// Rebuild an index from unpacked parts
    pub(crate) fn from_parts(bits: BitVec<u64, Lsb0>, m: usize, k: usize, n: u64) -> Self {
        Self {
            bits,
            m,
            k,
            n,
            advised: 0,
            target_error: 0.0,
        }
    }

    /// Size the index for an expected number of values
    ///
    /// Uses the 1% default error rate unless one was set.
    ///
    /// # Panics
    /// Panics if values have already been learned.
    pub fn advise(&mut self, expected: usize) {
        self.advised = expected;
        if self.target_error <= 0.0 {
            self.target_error = DEFAULT_ERROR_RATE;
        }
        self.resize();
    }

    /// Size the index for a target false positive rate
    ///
    /// Uses the default expected cardinality unless one was advised.
    ///
    /// # Panics
    /// Panics if values have already been learned.
    pub fn set_error_rate(&mut self, rate: f64) -> Result<(), IndexError> {
        if !(rate > 0.0 && rate < 1.0) {
            return Err(IndexError::InvalidErrorRate { rate });
        }
        self.target_error = rate;
        if self.advised == 0 {
            self.advised = DEFAULT_ADVISE_SIZE;
        }
        self.resize();
        Ok(())
    }

    fn resize(&mut self) {
        assert!(
            self.n == 0,
            "cannot resize BloomIndex after values have been learned"
        );
        let params = calculate_optimal_parameters(self.advised, self.target_error);
        self.m = params.size_bits;
        self.k = params.hash_count;
        self.bits = bitvec![u64, Lsb0; 0; self.m];
    }

    fn is_sized(&self) -> bool {
        self.k > 0 && self.m > 0
    }

    /// Learn a value that belongs to the set
    ///
    /// Sizes the index with default parameters first if it was never sized.
    pub fn learn(&mut self, value: &str) {
        if !self.is_sized() {
            if self.advised == 0 {
                self.advised = DEFAULT_ADVISE_SIZE;
            }
            if self.target_error <= 0.0 {
                self.target_error = DEFAULT_ERROR_RATE;
            }
            self.resize();
        }
        for pos in probe_positions(value.as_bytes(), self.m, self.k) {
            self.bits.set(pos, true);
        }
        self.n += 1;
    }

    /// Predict whether a value is in the set
    ///
    /// Returns `(false, 0.0)` when the value is definitely absent, otherwise
    /// `(true, confidence)` where confidence is one minus the estimated
    /// error rate.
    pub fn detect(&self, value: &str) -> (bool, f64) {
        if !self.is_sized() {
            return (false, 0.0);
        }
        for pos in probe_positions(value.as_bytes(), self.m, self.k) {
            if !self.bits[pos] {
                return (false, 0.0);
            }
        }
        (true, 1.0 - self.estimated_error_rate())
    }

    /// Shorthand for `detect(value).0`
    pub fn contains(&self, value: &str) -> bool {
        self.detect(value).0
    }

    /// Estimated false positive rate at the current load
    ///
    /// Formula: (1 - e^(-kn/m))^k
    pub fn estimated_error_rate(&self) -> f64 {
        if !self.is_sized() {
            return 0.0;
        }
        calculate_fpr(self.m, self.n, self.k)
    }

    /// Number of values learned
    pub fn count(&self) -> u64 {
        self.n
    }

    /// Size in bits
    pub fn size_bits(&self) -> usize {
        self.m
    }

    /// Number of hash probes
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Number of set bits
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Geometry `(m, k)` for `n` values at `error_rate`
    pub fn optimal_params(n: usize, error_rate: f64) -> (usize, usize) {
        let params = calculate_optimal_parameters(n, error_rate);
        (params.size_bits, params.hash_count)
    }

    fn optimal_size(&self, error_rate: f64) -> usize {
        calculate_optimal_parameters(self.n as usize, error_rate).size_bits
    }
}

impl fmt::Display for BloomIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bloom(m={}, k={}, n={})", self.m, self.k, self.n)?;
        writeln!(
            f,
            "estimated error rate  : {:.3}%",
            self.estimated_error_rate() * 100.0
        )?;
        writeln!(f, "optimal keys          : {}", optimal_k(self.m, self.n))?;
        for (label, rate) in [("1%", 0.01), ("10%", 0.1), ("30%", 0.3)] {
            let (m, k) = Self::optimal_params(self.n as usize, rate);
            writeln!(
                f,
                "optimal size (err={:<3}): {}",
                label,
                self.optimal_size(rate)
            )?;
            writeln!(
                f,
                "                params: k={}, m={} ({}kb)",
                k,
                m,
                (m / 8) / 1024
            )?;
        }
        Ok(())
    }
}
