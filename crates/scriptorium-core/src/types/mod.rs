//! Shared types used across the engine.

pub mod collections;
pub mod identifiers;

pub use identifiers::{ClassId, RecordId, System};
