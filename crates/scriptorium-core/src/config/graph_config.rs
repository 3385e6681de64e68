//! Graph analysis configuration.

use serde::{Deserialize, Serialize};

/// Morphological slot used as the activation matrix row axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VocabularySlot {
    Prefix,
    #[default]
    Middle,
    Suffix,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
    /// Row axis of the activation matrix. Default: middle.
    pub slot: Option<VocabularySlot>,
    /// Flat clusters cut from the dendrogram. Default: 8.
    pub clusters: Option<usize>,
    /// Shuffles in the permutation test. Default: 1000.
    pub permutations: Option<u32>,
    /// Base RNG seed for the permutation test. Default: 42.
    pub seed: Option<u64>,
}

impl GraphConfig {
    pub fn effective_slot(&self) -> VocabularySlot {
        self.slot.unwrap_or_default()
    }

    pub fn effective_clusters(&self) -> usize {
        self.clusters.unwrap_or(8)
    }

    pub fn effective_permutations(&self) -> u32 {
        self.permutations.unwrap_or(1000)
    }

    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(42)
    }
}
