//! Configuration system for Scriptorium.
//! TOML-based, 3-layer resolution: overrides > env > project file > defaults.

pub mod corpus_config;
pub mod graph_config;
pub mod morphology_config;
pub mod scriptorium_config;
pub mod survivor_config;

pub use corpus_config::{CorpusConfig, RecordGrouping};
pub use graph_config::{GraphConfig, VocabularySlot};
pub use morphology_config::{MorphologyConfig, UnprefixedPolicy};
pub use scriptorium_config::{ConfigOverrides, ScriptoriumConfig};
pub use survivor_config::{LegalityMode, SurvivorConfig, ZoneGranularity};
