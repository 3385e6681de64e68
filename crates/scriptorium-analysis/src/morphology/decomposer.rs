//! Greedy longest-match affix decomposer.

use std::sync::Arc;

use rayon::prelude::*;
use scriptorium_core::config::{MorphologyConfig, UnprefixedPolicy};
use scriptorium_core::errors::MorphologyError;

use super::affixes::AffixTable;
use super::types::{Middle, MorphologicalParse};

/// Decomposes tokens against one injected affix table.
///
/// Cheap to clone; the table is shared.
#[derive(Debug, Clone)]
pub struct Decomposer {
    table: Arc<AffixTable>,
    unprefixed: UnprefixedPolicy,
}

impl Decomposer {
    pub fn new(table: Arc<AffixTable>, unprefixed: UnprefixedPolicy) -> Self {
        Self { table, unprefixed }
    }

    /// Decomposer over the compiled default table.
    pub fn with_default_table() -> Self {
        Self::new(Arc::new(AffixTable::default_table()), UnprefixedPolicy::default())
    }

    pub fn from_config(config: &MorphologyConfig) -> Result<Self, MorphologyError> {
        Ok(Self::new(
            Arc::new(AffixTable::from_config(config)?),
            config.effective_unprefixed(),
        ))
    }

    pub fn table(&self) -> &AffixTable {
        &self.table
    }

    pub fn unprefixed_policy(&self) -> UnprefixedPolicy {
        self.unprefixed
    }

    /// Decompose one token. Total and deterministic.
    ///
    /// A prefix must be strictly shorter than the token. A suffix may consume
    /// the rest after a prefix (leaving the empty middle) but never the whole
    /// token, so an unprefixed token always keeps a non-empty middle.
    pub fn extract(&self, token: &str) -> MorphologicalParse {
        let lowered = token.to_lowercase();
        if lowered.is_empty() {
            return MorphologicalParse::default();
        }
        let total = lowered.len();

        let prefix = self
            .table
            .prefixes()
            .iter()
            .find(|p| p.len() < total && lowered.starts_with(p.as_str()));

        let rest = match prefix {
            Some(p) => &lowered[p.len()..],
            None => lowered.as_str(),
        };

        let suffix = match (prefix, self.unprefixed) {
            (None, UnprefixedPolicy::Opaque) => None,
            _ => self
                .table
                .suffixes()
                .iter()
                .find(|s| s.len() < total && rest.ends_with(s.as_str())),
        };

        let middle = match suffix {
            Some(s) => &rest[..rest.len() - s.len()],
            None => rest,
        };

        MorphologicalParse {
            prefix: prefix.cloned(),
            middle: Some(if middle.is_empty() {
                Middle::Empty
            } else {
                Middle::Value(middle.to_string())
            }),
            suffix: suffix.cloned(),
        }
    }

    /// Decompose many tokens in parallel, preserving input order.
    pub fn extract_all<S: AsRef<str> + Sync>(&self, tokens: &[S]) -> Vec<MorphologicalParse> {
        tokens.par_iter().map(|t| self.extract(t.as_ref())).collect()
    }
}
