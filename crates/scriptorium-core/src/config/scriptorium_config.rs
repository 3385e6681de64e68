//! Top-level Scriptorium configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CorpusConfig, GraphConfig, LegalityMode, MorphologyConfig, RecordGrouping, SurvivorConfig,
    UnprefixedPolicy,
};
use crate::errors::ConfigError;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "scriptorium.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`SCRIPTORIUM_*`)
/// 3. Project config (`scriptorium.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScriptoriumConfig {
    pub morphology: MorphologyConfig,
    pub corpus: CorpusConfig,
    pub survivor: SurvivorConfig,
    pub graph: GraphConfig,
}

/// Programmatic overrides, typically supplied by a calling script.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mode: Option<LegalityMode>,
    pub grouping: Option<RecordGrouping>,
    pub unprefixed: Option<UnprefixedPolicy>,
    pub permutations: Option<u32>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

impl ScriptoriumConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (no env or overrides).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ScriptoriumConfig) -> Result<(), ConfigError> {
        if config.morphology.has_custom_table() && config.morphology.table_version.is_none() {
            return Err(ConfigError::ValidationFailed {
                field: "morphology.table_version".to_string(),
                message: "a custom affix table must carry a version label".to_string(),
            });
        }
        if let Some(ref gallows) = config.corpus.gallows {
            if gallows.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "corpus.gallows".to_string(),
                    message: "must contain at least one character".to_string(),
                });
            }
        }
        if let Some(ref marker) = config.corpus.uncertainty_marker {
            if marker.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "corpus.uncertainty_marker".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if let Some(ref track) = config.corpus.primary_track {
            if track.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "corpus.primary_track".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config.survivor.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "survivor.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.graph.clusters == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "graph.clusters".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.graph.permutations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "graph.permutations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ScriptoriumConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ScriptoriumConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut ScriptoriumConfig, other: &ScriptoriumConfig) {
        // Morphology: a custom table is replaced as a unit.
        if other.morphology.has_custom_table() {
            base.morphology.table_version = other.morphology.table_version.clone();
            base.morphology.prefixes = other.morphology.prefixes.clone();
            base.morphology.suffixes = other.morphology.suffixes.clone();
        }
        if other.morphology.unprefixed.is_some() {
            base.morphology.unprefixed = other.morphology.unprefixed;
        }

        // Corpus
        if other.corpus.primary_track.is_some() {
            base.corpus.primary_track = other.corpus.primary_track.clone();
        }
        if other.corpus.uncertainty_marker.is_some() {
            base.corpus.uncertainty_marker = other.corpus.uncertainty_marker.clone();
        }
        if other.corpus.gallows.is_some() {
            base.corpus.gallows = other.corpus.gallows.clone();
        }
        if other.corpus.grouping.is_some() {
            base.corpus.grouping = other.corpus.grouping;
        }

        // Survivor
        if other.survivor.mode.is_some() {
            base.survivor.mode = other.survivor.mode;
        }
        if other.survivor.zone_granularity.is_some() {
            base.survivor.zone_granularity = other.survivor.zone_granularity;
        }
        if other.survivor.threads.is_some() {
            base.survivor.threads = other.survivor.threads;
        }

        // Graph
        if other.graph.slot.is_some() {
            base.graph.slot = other.graph.slot;
        }
        if other.graph.clusters.is_some() {
            base.graph.clusters = other.graph.clusters;
        }
        if other.graph.permutations.is_some() {
            base.graph.permutations = other.graph.permutations;
        }
        if other.graph.seed.is_some() {
            base.graph.seed = other.graph.seed;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SCRIPTORIUM_SURVIVOR_MODE`, `SCRIPTORIUM_GRAPH_SEED`, etc.
    fn apply_env_overrides(config: &mut ScriptoriumConfig) {
        if let Ok(val) = std::env::var("SCRIPTORIUM_SURVIVOR_MODE") {
            match val.as_str() {
                "strict" => config.survivor.mode = Some(LegalityMode::Strict),
                "zone_union" => config.survivor.mode = Some(LegalityMode::ZoneUnion),
                other => {
                    ::tracing::warn!(value = other, "ignoring unknown SCRIPTORIUM_SURVIVOR_MODE");
                }
            }
        }
        if let Ok(val) = std::env::var("SCRIPTORIUM_SURVIVOR_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.survivor.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCRIPTORIUM_CORPUS_GROUPING") {
            match val.as_str() {
                "line" => config.corpus.grouping = Some(RecordGrouping::Line),
                "paragraph" => config.corpus.grouping = Some(RecordGrouping::Paragraph),
                other => {
                    ::tracing::warn!(value = other, "ignoring unknown SCRIPTORIUM_CORPUS_GROUPING");
                }
            }
        }
        if let Ok(val) = std::env::var("SCRIPTORIUM_GRAPH_PERMUTATIONS") {
            if let Ok(v) = val.parse::<u32>() {
                config.graph.permutations = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SCRIPTORIUM_GRAPH_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.graph.seed = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(config: &mut ScriptoriumConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.mode {
            config.survivor.mode = Some(v);
        }
        if let Some(v) = overrides.grouping {
            config.corpus.grouping = Some(v);
        }
        if let Some(v) = overrides.unprefixed {
            config.morphology.unprefixed = Some(v);
        }
        if let Some(v) = overrides.permutations {
            config.graph.permutations = Some(v);
        }
        if let Some(v) = overrides.seed {
            config.graph.seed = Some(v);
        }
        if let Some(v) = overrides.threads {
            config.survivor.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Stable hash of the configuration, used as part of cache keys.
    pub fn fingerprint(&self) -> u64 {
        // JSON keeps struct field order, so equal configs hash equally.
        let encoded = serde_json::to_vec(self).unwrap_or_default();
        xxhash_rust::xxh3::xxh3_64(&encoded)
    }
}
