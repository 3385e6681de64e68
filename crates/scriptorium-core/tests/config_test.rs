//! Tests for the Scriptorium configuration system.

use std::sync::Mutex;

use scriptorium_core::config::{
    ConfigOverrides, LegalityMode, RecordGrouping, ScriptoriumConfig, UnprefixedPolicy,
    VocabularySlot, ZoneGranularity,
};
use scriptorium_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_scriptorium_env_vars() {
    for key in [
        "SCRIPTORIUM_SURVIVOR_MODE",
        "SCRIPTORIUM_SURVIVOR_THREADS",
        "SCRIPTORIUM_CORPUS_GROUPING",
        "SCRIPTORIUM_GRAPH_PERMUTATIONS",
        "SCRIPTORIUM_GRAPH_SEED",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_scriptorium_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("scriptorium.toml"),
        r#"
[survivor]
mode = "zone_union"

[graph]
permutations = 200
seed = 7
"#,
    )
    .unwrap();

    std::env::set_var("SCRIPTORIUM_GRAPH_PERMUTATIONS", "500");

    let overrides = ConfigOverrides {
        seed: Some(99),
        ..Default::default()
    };
    let config = ScriptoriumConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Project file sets the mode.
    assert_eq!(config.survivor.effective_mode(), LegalityMode::ZoneUnion);
    // Env beats the project file.
    assert_eq!(config.graph.effective_permutations(), 500);
    // Overrides beat everything.
    assert_eq!(config.graph.effective_seed(), 99);

    clear_scriptorium_env_vars();
}

#[test]
fn test_missing_project_file_gives_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_scriptorium_env_vars();

    let dir = tempdir();
    let config = ScriptoriumConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.survivor.effective_mode(), LegalityMode::Strict);
    assert_eq!(config.survivor.effective_zone_granularity(), ZoneGranularity::Folio);
    assert_eq!(config.corpus.effective_grouping(), RecordGrouping::Line);
    assert_eq!(config.corpus.effective_primary_track(), "H");
    assert_eq!(config.corpus.effective_uncertainty_marker(), "*");
    assert_eq!(config.corpus.effective_gallows(), vec!['k', 't', 'p', 'f']);
    assert_eq!(config.morphology.effective_unprefixed(), UnprefixedPolicy::StripSuffix);
    assert_eq!(config.graph.effective_slot(), VocabularySlot::Middle);
    assert_eq!(config.graph.effective_clusters(), 8);
    assert_eq!(config.graph.effective_permutations(), 1000);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = ScriptoriumConfig::from_toml("[graph\npermutations = ");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_unknown_mode_string_is_parse_error() {
    let result = ScriptoriumConfig::from_toml("[survivor]\nmode = \"loose\"\n");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_validation_rejects_zero_permutations() {
    let result = ScriptoriumConfig::from_toml("[graph]\npermutations = 0\n");
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "graph.permutations");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_validation_rejects_empty_gallows() {
    let result = ScriptoriumConfig::from_toml("[corpus]\ngallows = \"\"\n");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_custom_affix_table_needs_version() {
    let result = ScriptoriumConfig::from_toml("[morphology]\nprefixes = [\"qo\"]\n");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));

    let ok = ScriptoriumConfig::from_toml(
        "[morphology]\ntable_version = \"exp-1\"\nprefixes = [\"qo\"]\nsuffixes = [\"y\"]\n",
    )
    .unwrap();
    assert!(ok.morphology.has_custom_table());
}

#[test]
fn test_toml_round_trip() {
    let config = ScriptoriumConfig::from_toml(
        "[survivor]\nmode = \"zone_union\"\nzone_granularity = \"placement\"\n[corpus]\ngrouping = \"paragraph\"\n",
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = ScriptoriumConfig::from_toml(&rendered).unwrap();
    assert_eq!(config, reparsed);
}

#[test]
fn test_fingerprint_tracks_effective_values() {
    let a = ScriptoriumConfig::default();
    let b = ScriptoriumConfig::default();
    assert_eq!(a.fingerprint(), b.fingerprint());

    let mut c = ScriptoriumConfig::default();
    ScriptoriumConfig::apply_overrides(
        &mut c,
        &ConfigOverrides {
            mode: Some(LegalityMode::ZoneUnion),
            ..Default::default()
        },
    );
    assert_ne!(a.fingerprint(), c.fingerprint());
}
