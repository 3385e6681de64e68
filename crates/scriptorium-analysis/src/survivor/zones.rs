//! AZC zone → MIDDLE index for zone-union legality.

use std::collections::{BTreeMap, BTreeSet};

use scriptorium_core::config::ZoneGranularity;
use scriptorium_core::types::collections::{FxHashMap, SmallVec4};
use scriptorium_core::types::System;
use tracing::info;

use crate::corpus::{Corpus, Token};
use crate::morphology::Decomposer;

/// Zone-keyed MIDDLE sets with a reverse MIDDLE → zone index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneIndex {
    zones: BTreeMap<String, BTreeSet<String>>,
    by_middle: FxHashMap<String, SmallVec4<String>>,
}

impl ZoneIndex {
    /// Build from the corpus' AZC tokens.
    pub fn from_corpus(
        corpus: &Corpus,
        decomposer: &Decomposer,
        granularity: ZoneGranularity,
    ) -> Self {
        let index = Self::from_sets(corpus.tokens_in(System::Azc).filter_map(|token| {
            let middle = decomposer.extract(&token.word).middle_value()?.to_string();
            Some((zone_key(token, granularity), [middle]))
        }));
        info!(
            zones = index.len(),
            middles = index.by_middle.len(),
            ?granularity,
            "zone index built"
        );
        index
    }

    /// Build from explicit (zone, middles) pairs. Repeated zones accumulate.
    pub fn from_sets<Z, I, M>(sets: impl IntoIterator<Item = (Z, I)>) -> Self
    where
        Z: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let mut zones: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (zone, middles) in sets {
            zones
                .entry(zone.into())
                .or_default()
                .extend(middles.into_iter().map(Into::into));
        }
        let mut by_middle: FxHashMap<String, SmallVec4<String>> = FxHashMap::default();
        for (zone, middles) in &zones {
            for middle in middles {
                by_middle
                    .entry(middle.clone())
                    .or_default()
                    .push(zone.clone());
            }
        }
        Self { zones, by_middle }
    }

    /// `middles` plus the full MIDDLE set of every zone that shares one of them.
    pub fn expand(&self, middles: &BTreeSet<String>) -> BTreeSet<String> {
        let mut hit: BTreeSet<&str> = BTreeSet::new();
        for middle in middles {
            if let Some(zones) = self.by_middle.get(middle) {
                hit.extend(zones.iter().map(String::as_str));
            }
        }
        let mut out = middles.clone();
        for zone in hit {
            if let Some(set) = self.zones.get(zone) {
                out.extend(set.iter().cloned());
            }
        }
        out
    }

    pub fn zone(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.zones.get(name)
    }

    pub fn zone_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.zones.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

fn zone_key(token: &Token, granularity: ZoneGranularity) -> String {
    match granularity {
        ZoneGranularity::Folio => token.folio.clone(),
        ZoneGranularity::Placement => {
            format!("{}:{}", token.folio, placement_family(&token.placement))
        }
    }
}

/// Placement code with trailing digits removed: `R2` → `R`, `S1` → `S`.
pub fn placement_family(placement: &str) -> &str {
    placement.trim_end_matches(|c: char| c.is_ascii_digit())
}
