//! Detection domain types

pub mod column;
pub mod hit;

pub use column::classify_column;
pub use hit::{SourceHit, EXAMPLE_HIT_SIZE, MIN_SAMPLE_RATIO};
