//! Ports for the mapping subsystem

pub mod outbound;

pub use outbound::MappingStore;
