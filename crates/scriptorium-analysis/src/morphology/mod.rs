//! Morphology: deterministic prefix/middle/suffix decomposition.
//!
//! One versioned, immutable affix table is injected into the decomposer.
//! Greedy longest-match on prefixes, then on suffixes of the remainder.

pub mod affixes;
pub mod decomposer;
pub mod types;

pub use affixes::{AffixTable, DEFAULT_TABLE_VERSION};
pub use decomposer::Decomposer;
pub use types::{Middle, MorphologicalParse, Vocabulary};
