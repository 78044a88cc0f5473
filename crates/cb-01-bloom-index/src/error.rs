//! Error types for the bloom index

use thiserror::Error;

/// Errors that can occur while sizing, packing or unpacking an index
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Invalid error rate: {rate} (must be between 0.0 and 1.0, exclusive)")]
    InvalidErrorRate { rate: f64 },

    #[error("Compression failed: {0}")]
    CompressFailed(std::io::Error),

    #[error("Decompression failed: {0}")]
    DecompressFailed(std::io::Error),

    #[error("Packed index truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Packed index has {extra} trailing bytes")]
    TrailingBytes { extra: usize },

    #[error("Packed index header is invalid: {0}")]
    InvalidHeader(String),
}
