//! Property-based checks of the decomposer and survivor-set invariants.
//!
//! Covers:
//!   - reassembly of prefix + middle + suffix
//!   - determinism of decomposition
//!   - survivor-set monotonicity in the legal vocabulary
//!   - unconditional membership of ATOMIC-class tokens

mod common;

use proptest::prelude::*;

use scriptorium_analysis::morphology::{Decomposer, Vocabulary};
use scriptorium_analysis::survivor::{SurvivorEngine, SurvivorStrategy};
use scriptorium_core::config::UnprefixedPolicy;
use scriptorium_core::types::RecordId;

const PREFIX_POOL: &[&str] = &["qo", "ch", "sh"];
const MIDDLE_POOL: &[&str] = &["k", "t", "ol", "e", "x"];
const SUFFIX_POOL: &[&str] = &["aiin", "y", "dy"];

fn pick(pool: &'static [&'static str], mask: u8) -> impl Iterator<Item = String> + 'static {
    pool.iter()
        .enumerate()
        .filter(move |(i, _)| mask & (1 << i) != 0)
        .map(|(_, v)| v.to_string())
}

fn vocabulary(p: u8, m: u8, s: u8) -> Vocabulary {
    let mut v = Vocabulary::new();
    v.prefixes.extend(pick(PREFIX_POOL, p));
    v.middles.extend(pick(MIDDLE_POOL, m));
    v.suffixes.extend(pick(SUFFIX_POOL, s));
    v
}

fn engine() -> SurvivorEngine {
    SurvivorEngine::new(
        &common::small_classifier(),
        &common::small_decomposer(),
        SurvivorStrategy::Strict,
    )
}

proptest! {
    /// prefix + middle + suffix rebuilds the lowercased token.
    #[test]
    fn prop_reassembly(token in "[a-zA-Z]{0,14}") {
        let d = Decomposer::with_default_table();
        prop_assert_eq!(d.extract(&token).reassemble(), token.to_lowercase());
    }

    #[test]
    fn prop_reassembly_opaque_policy(token in "[a-z]{0,14}") {
        let d = Decomposer::new(
            std::sync::Arc::new(scriptorium_analysis::AffixTable::default_table()),
            UnprefixedPolicy::Opaque,
        );
        prop_assert_eq!(d.extract(&token).reassemble(), token);
    }

    /// Decomposition is a pure function of the token.
    #[test]
    fn prop_deterministic(token in "[a-z]{0,14}") {
        let d = Decomposer::with_default_table();
        prop_assert_eq!(d.extract(&token), d.extract(&token));
    }

    /// A token with no matched prefix always keeps a non-empty middle.
    #[test]
    fn prop_unprefixed_keeps_middle(token in "[a-z]{1,14}") {
        let parse = Decomposer::with_default_table().extract(&token);
        if parse.prefix.is_none() {
            prop_assert!(parse.has_middle());
        }
    }

    /// M ⊆ M' implies SurvivorSet(M) ⊆ SurvivorSet(M').
    #[test]
    fn prop_monotone_in_vocabulary(
        p in 0u8..8, m in 0u8..32, s in 0u8..8,
        extra_p in 0u8..8, extra_m in 0u8..32, extra_s in 0u8..8,
    ) {
        let engine = engine();
        let small = engine.survivors_for_vocabulary(RecordId::from("r"), &vocabulary(p, m, s));
        let large = engine.survivors_for_vocabulary(
            RecordId::from("r"),
            &vocabulary(p | extra_p, m | extra_m, s | extra_s),
        );
        prop_assert!(small.is_subset(&large));
        prop_assert!(small.classes.is_subset(&large.classes));
    }

    /// ATOMIC-class tokens survive under every legal vocabulary.
    #[test]
    fn prop_atomic_always_survive(p in 0u8..8, m in 0u8..32, s in 0u8..8) {
        let classifier = common::small_classifier();
        let engine = engine();
        let set = engine.survivors_for_vocabulary(RecordId::from("r"), &vocabulary(p, m, s));
        for class_id in classifier.atomic_classes() {
            prop_assert!(set.contains_class(class_id));
            for token in classifier.members(class_id) {
                prop_assert!(set.contains_token(token));
            }
        }
    }
}
