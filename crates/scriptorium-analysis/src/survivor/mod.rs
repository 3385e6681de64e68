//! Survivor sets: the classified tokens each record's vocabulary leaves legal.

pub mod engine;
pub mod index;
pub mod types;
pub mod zones;

pub use engine::{SurvivorEngine, SurvivorStrategy};
pub use index::SurvivorIndex;
pub use types::SurvivorSet;
pub use zones::ZoneIndex;

/// Legal prefix/middle/suffix sets for one survivor computation.
pub use crate::morphology::Vocabulary as LegalVocabulary;
