//! # CB-01 Bloom Index
//!
//! Probabilistic membership index used to represent one identifier catalog
//! (or one named subset of it) compactly.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pure logic, no I/O
//!   - `BloomIndex`: the index itself (sizing, learning, detection)
//!   - `parameters`: sizing formulas and error estimates
//!   - `hash_functions`: keyed double hashing
//!   - `codec`: compressed pack/unpack wire format
//!
//! ## Invariants
//!
//! - **No false negatives**: a learned value is always detected.
//! - **Fixed geometry**: `m` and `k` never change once a value is learned.
//! - **Estimated error**: `(1 - e^(-kn/m))^k`.
//!
//! ## Usage Example
//!
//! ```
//! use cb_01_bloom_index::BloomIndex;
//!
//! let mut index = BloomIndex::new();
//! index.advise(3);
//! for id in ["HGNC:5", "HGNC:37133", "HGNC:24086"] {
//!     index.learn(id);
//! }
//!
//! let (present, confidence) = index.detect("HGNC:5");
//! assert!(present);
//! assert!(confidence > 0.0);
//!
//! let packed = index.pack().unwrap();
//! let restored = BloomIndex::unpack(&packed).unwrap();
//! assert!(restored.detect("HGNC:37133").0);
//! ```

pub mod domain;
pub mod error;

pub use domain::{
    calculate_fpr, calculate_optimal_parameters, BloomIndex, BloomIndexParams,
    DEFAULT_ADVISE_SIZE, DEFAULT_ERROR_RATE,
};
pub use error::IndexError;
