//! Morphology configuration.

use serde::{Deserialize, Serialize};

/// What to do with a token when no prefix matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnprefixedPolicy {
    /// Still try to strip a suffix from the full token.
    #[default]
    StripSuffix,
    /// Treat the whole token as an opaque middle.
    Opaque,
}

/// Configuration for the affix decomposer.
///
/// Empty `prefixes`/`suffixes` mean "use the compiled default table".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MorphologyConfig {
    /// Version label of a custom table. Required when custom affixes are given.
    pub table_version: Option<String>,
    /// Custom prefix list, any order; sorted longest-first at construction.
    pub prefixes: Vec<String>,
    /// Custom suffix list, any order; sorted longest-first at construction.
    pub suffixes: Vec<String>,
    /// Unprefixed-token policy. Default: strip_suffix.
    pub unprefixed: Option<UnprefixedPolicy>,
}

impl MorphologyConfig {
    pub fn effective_unprefixed(&self) -> UnprefixedPolicy {
        self.unprefixed.unwrap_or_default()
    }

    /// Whether a custom table replaces the compiled default.
    pub fn has_custom_table(&self) -> bool {
        !self.prefixes.is_empty() || !self.suffixes.is_empty()
    }
}
