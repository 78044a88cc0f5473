//! Optimal bloom index parameter calculation
//!
//! Formulas:
//! - m = ceil(n * ln(e) / -(ln 2)^2)  -- bits
//! - k = max(1, round(ln 2 * m / n))  -- probes
//! - error = (1 - e^(-kn/m))^k

use std::f64::consts::LN_2;

/// Bloom index geometry
#[derive(Clone, Debug, PartialEq)]
pub struct BloomIndexParams {
    /// Number of bits in the index
    pub size_bits: usize,
    /// Number of hash probes
    pub hash_count: usize,
    /// Expected false positive rate once `n` elements are learned
    pub expected_fpr: f64,
}

/// Calculate index geometry for an expected element count and error rate
///
/// An expected count of zero still yields a usable one-bit index so that
/// modular probing never divides by zero.
pub fn calculate_optimal_parameters(num_elements: usize, target_fpr: f64) -> BloomIndexParams {
    if num_elements == 0 {
        return BloomIndexParams {
            size_bits: 1,
            hash_count: 1,
            expected_fpr: 0.0,
        };
    }

    let n = num_elements as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = (n * target_fpr.ln() / -ln2_squared).ceil().max(1.0) as usize;
    let k = (LN_2 * m as f64 / n).round().max(1.0) as usize;

    BloomIndexParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, num_elements as u64, k),
    }
}

/// Calculate the false positive rate for given geometry and load
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: u64, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Optimal probe count for a bit array of `m` bits holding `n` elements
pub fn optimal_k(m: usize, n: u64) -> usize {
    if n == 0 {
        return 1;
    }
    ((m as f64 / n as f64) * LN_2).round().max(1.0) as usize
}
