//! Survivor set snapshot.

use std::collections::BTreeSet;

use scriptorium_core::types::{ClassId, RecordId};
use serde::{Deserialize, Serialize};

/// Immutable per-record result. Sets are ordered so output is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivorSet {
    pub record_id: RecordId,
    pub classes: BTreeSet<ClassId>,
    pub tokens: BTreeSet<String>,
    /// Size of the MIDDLE set the predicate ran against, after any zone expansion.
    pub legal_middle_count: usize,
}

impl SurvivorSet {
    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn contains_class(&self, class_id: ClassId) -> bool {
        self.classes.contains(&class_id)
    }

    /// Canonical sorted class tuple, the key for collision detection.
    pub fn class_tuple(&self) -> Vec<ClassId> {
        self.classes.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when every surviving token here also survives in `other`.
    pub fn is_subset(&self, other: &SurvivorSet) -> bool {
        self.tokens.is_subset(&other.tokens)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
