//! Versioned affix tables.

use std::cmp::Reverse;

use scriptorium_core::config::MorphologyConfig;
use scriptorium_core::errors::MorphologyError;
use scriptorium_core::types::collections::FxHashSet;
use serde::Serialize;

/// Version label of the compiled default table.
pub const DEFAULT_TABLE_VERSION: &str = "3";

const DEFAULT_PREFIXES: &[&str] = &[
    "qo", "ch", "sh", "ct", "sa", "so", "o", "lch", "lsh", "pch", "tch", "kch", "fch", "cth",
    "ckh", "cph", "cfh",
];

// Vowel runs ("e", "ee", "ai") stay in the middle; only closing glyphs are suffixes.
const DEFAULT_SUFFIXES: &[&str] = &[
    "aiin", "aiir", "ain", "air", "dy", "y", "n", "l", "r", "s", "m",
];

/// An immutable, versioned pair of affix lists.
///
/// Both lists are kept sorted by descending length; equal lengths keep
/// declaration order. The first hit in a scan is the longest match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffixTable {
    version: String,
    prefixes: Vec<String>,
    suffixes: Vec<String>,
}

impl AffixTable {
    pub fn new<P, S>(
        version: impl Into<String>,
        prefixes: impl IntoIterator<Item = P>,
        suffixes: impl IntoIterator<Item = S>,
    ) -> Result<Self, MorphologyError>
    where
        P: Into<String>,
        S: Into<String>,
    {
        let version = version.into();
        let prefixes = Self::prepare("prefix", &version, prefixes)?;
        let suffixes = Self::prepare("suffix", &version, suffixes)?;
        Ok(Self {
            version,
            prefixes,
            suffixes,
        })
    }

    /// The compiled default table.
    pub fn default_table() -> Self {
        let mut prefixes: Vec<String> = DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect();
        let mut suffixes: Vec<String> = DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect();
        prefixes.sort_by_key(|a| Reverse(a.chars().count()));
        suffixes.sort_by_key(|a| Reverse(a.chars().count()));
        Self {
            version: DEFAULT_TABLE_VERSION.to_string(),
            prefixes,
            suffixes,
        }
    }

    /// Custom table from config, or the default when none is configured.
    pub fn from_config(config: &MorphologyConfig) -> Result<Self, MorphologyError> {
        if !config.has_custom_table() {
            return Ok(Self::default_table());
        }
        let version = config
            .table_version
            .clone()
            .unwrap_or_else(|| "custom".to_string());
        Self::new(version, config.prefixes.clone(), config.suffixes.clone())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    fn prepare<T: Into<String>>(
        slot: &'static str,
        version: &str,
        entries: impl IntoIterator<Item = T>,
    ) -> Result<Vec<String>, MorphologyError> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for entry in entries {
            let affix: String = entry.into();
            if affix.is_empty() {
                return Err(MorphologyError::EmptyAffix {
                    slot,
                    version: version.to_string(),
                });
            }
            if affix.to_lowercase() != affix {
                return Err(MorphologyError::NotLowercase {
                    slot,
                    affix,
                    version: version.to_string(),
                });
            }
            if !seen.insert(affix.clone()) {
                return Err(MorphologyError::DuplicateAffix {
                    slot,
                    affix,
                    version: version.to_string(),
                });
            }
            out.push(affix);
        }
        // Stable sort: equal lengths keep declaration order.
        out.sort_by_key(|a| Reverse(a.chars().count()));
        Ok(out)
    }
}
