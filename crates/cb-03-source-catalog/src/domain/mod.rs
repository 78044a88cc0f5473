//! Catalog domain types

pub mod directive;
pub mod source;
pub mod timestamp;

pub use directive::MappingDirective;
pub use source::{Source, SourceInfo};
pub use timestamp::parse_timestamp;
