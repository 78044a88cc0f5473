//! Domain Layer - Pure index logic
//!
//! RULES:
//! - No file or network I/O
//! - No async code

pub mod bloom_index;
pub mod codec;
pub mod hash_functions;
pub mod parameters;

pub use bloom_index::{BloomIndex, DEFAULT_ADVISE_SIZE, DEFAULT_ERROR_RATE};
pub use parameters::{calculate_fpr, calculate_optimal_parameters, BloomIndexParams};
