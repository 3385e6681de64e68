//! Inverted slot indices over the classified-token universe.

use std::collections::BTreeSet;
use std::time::Instant;

use scriptorium_core::config::VocabularySlot;
use scriptorium_core::tracing::metrics;
use scriptorium_core::types::collections::{FxHashMap, SmallVec4};
use scriptorium_core::types::ClassId;
use tracing::{debug, field, info, info_span};

use crate::classification::Classifier;
use crate::morphology::{Decomposer, MorphologicalParse, Vocabulary};

const SLOTS: [VocabularySlot; 3] = [
    VocabularySlot::Prefix,
    VocabularySlot::Middle,
    VocabularySlot::Suffix,
];

/// One classified token with its precomputed parse.
#[derive(Debug, Clone)]
pub struct IndexedToken {
    pub token: String,
    pub class_id: ClassId,
    pub parse: MorphologicalParse,
}

/// Value → token postings for one slot, plus the tokens with no value there.
#[derive(Debug, Default)]
struct SlotIndex {
    postings: FxHashMap<String, SmallVec4<u32>>,
    unset: Vec<u32>,
}

impl SlotIndex {
    /// Upper bound on the candidates this slot yields for `legal`.
    fn candidate_count(&self, legal: &BTreeSet<String>) -> usize {
        self.unset.len()
            + legal
                .iter()
                .filter_map(|v| self.postings.get(v))
                .map(|p| p.len())
                .sum::<usize>()
    }

    fn candidates<'a>(&'a self, legal: &'a BTreeSet<String>) -> impl Iterator<Item = u32> + 'a {
        self.unset.iter().copied().chain(
            legal
                .iter()
                .filter_map(|v| self.postings.get(v))
                .flat_map(|p| p.iter().copied()),
        )
    }
}

/// Built once per classifier; immutable afterwards.
#[derive(Debug)]
pub struct SurvivorIndex {
    universe: Vec<IndexedToken>,
    slots: [SlotIndex; 3],
    atomic: Vec<u32>,
}

impl SurvivorIndex {
    pub fn build(classifier: &Classifier, decomposer: &Decomposer) -> Self {
        let start = Instant::now();
        let span = info_span!("survivor_index_build", index_build_ms = field::Empty);
        let _guard = span.enter();

        let universe: Vec<IndexedToken> = classifier
            .classified_tokens()
            .map(|(token, class_id)| IndexedToken {
                token: token.to_string(),
                class_id,
                parse: decomposer.extract(token),
            })
            .collect();

        let mut slots: [SlotIndex; 3] = Default::default();
        let mut atomic = Vec::new();
        for (i, entry) in universe.iter().enumerate() {
            let i = i as u32;
            for (slot, index) in SLOTS.iter().zip(slots.iter_mut()) {
                match entry.parse.slot(*slot) {
                    Some(value) => index.postings.entry(value.to_string()).or_default().push(i),
                    None => index.unset.push(i),
                }
            }
            if classifier.is_atomic(entry.class_id) {
                atomic.push(i);
            }
        }

        let elapsed = start.elapsed().as_millis() as u64;
        span.record(metrics::INDEX_BUILD_MS, elapsed);
        info!(
            tokens = universe.len(),
            atomic = atomic.len(),
            middles = slots[1].postings.len(),
            "survivor index built"
        );
        debug!(elapsed_ms = elapsed, "index build done");

        Self {
            universe,
            slots,
            atomic,
        }
    }

    pub fn universe(&self) -> &[IndexedToken] {
        &self.universe
    }

    pub fn token(&self, idx: u32) -> &IndexedToken {
        &self.universe[idx as usize]
    }

    /// Tokens of ATOMIC classes.
    pub fn atomic(&self) -> &[u32] {
        &self.atomic
    }

    /// Universe indices of tokens whose three slots are each absent or legal.
    ///
    /// Candidates come from the slot with the fewest postings under `legal`;
    /// the other two slots are checked per candidate. Output is sorted and
    /// deduplicated.
    pub fn matching(&self, legal: &Vocabulary) -> Vec<u32> {
        let driver = (0..SLOTS.len())
            .min_by_key(|&s| self.slots[s].candidate_count(legal.values(SLOTS[s])))
            .unwrap_or(1);

        let mut hits: Vec<u32> = self.slots[driver]
            .candidates(legal.values(SLOTS[driver]))
            .filter(|&i| {
                let parse = &self.token(i).parse;
                SLOTS
                    .iter()
                    .enumerate()
                    .filter(|(s, _)| *s != driver)
                    .all(|(_, slot)| legal.admits(*slot, parse.slot(*slot)))
            })
            .collect();
        hits.sort_unstable();
        hits.dedup();
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{ClassTable, RoleMap};

    fn index() -> SurvivorIndex {
        let json = r#"{
            "token_to_class": {"qokaiin": 1, "qotaiin": 2, "ol": 3, "chy": 4},
            "class_to_tokens": {"1": ["qokaiin"], "2": ["qotaiin"], "3": ["ol"], "4": ["chy"]}
        }"#;
        let table = ClassTable::from_json(json, "<test>").unwrap();
        let decomposer = Decomposer::new(
            std::sync::Arc::new(
                crate::morphology::AffixTable::new("t", ["qo", "ch"], ["aiin", "y"]).unwrap(),
            ),
            Default::default(),
        );
        let classifier = Classifier::from_table(table, &decomposer, RoleMap::default());
        SurvivorIndex::build(&classifier, &decomposer)
    }

    fn tokens(index: &SurvivorIndex, hits: &[u32]) -> Vec<String> {
        hits.iter().map(|&i| index.token(i).token.clone()).collect()
    }

    #[test]
    fn test_matching_requires_every_slot() {
        let index = index();
        let mut legal = Vocabulary::new();
        legal.prefixes.insert("qo".into());
        legal.middles.insert("k".into());
        legal.suffixes.insert("aiin".into());
        assert_eq!(tokens(&index, &index.matching(&legal)), vec!["qokaiin"]);

        legal.suffixes.clear();
        assert!(index.matching(&legal).is_empty());
    }

    #[test]
    fn test_unset_slots_are_legal() {
        let index = index();
        let mut legal = Vocabulary::new();
        legal.middles.insert("ol".into());
        assert_eq!(tokens(&index, &index.matching(&legal)), vec!["ol"]);
    }

    #[test]
    fn test_atomic_tokens_indexed() {
        let index = index();
        assert_eq!(tokens(&index, index.atomic()), vec!["chy"]);
    }
}
