//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use scriptorium_analysis::classification::{ClassTable, Classifier, RoleMap};
use scriptorium_analysis::morphology::{AffixTable, Decomposer};
use scriptorium_core::config::UnprefixedPolicy;

pub const HEADER: &str = "word\tfolio\tsection\tlanguage\tplacement\tline_number\ttranscriber";

/// Three folios: f1r (A), f2r (B), f67r (AZC). Includes one secondary-track
/// row, one uncertain token, and one malformed row.
pub const TRANSCRIPTION_ROWS: &[&str] = &[
    "tchor\tf1r\tH\tA\tP\t1\tH",
    "daiin\tf1r\tH\tA\tP\t1\tH",
    "chol\tf1r\tH\tA\tP\t1\tH",
    "chol\tf1r\tH\tA\tP\t1\tF",
    "shol\tf1r\tH\tA\tP\t2\tH",
    "qokaiin\tf1r\tH\tA\tP\t2\tH",
    "ch*dy\tf1r\tH\tA\tP\t2\tH",
    "pchedy\tf1r\tH\tA\tP\t3\tH",
    "otaly\tf1r\tH\tA\tP\t3\tH",
    "qokeedy\tf2r\tB\tB\tP\t1\tH",
    "chedy\tf2r\tB\tB\tP\t1\tH",
    "otar\tf2r\tB\tB\tP\t1\tH",
    "kol\tf2r\tB\tB\tP\t2\tH",
    "daiin\tf2r\tB\tB\tP\t2\tH",
    "broken\tf2r\tB\tB\tP\tnotanumber\tH",
    "otaly\tf67r\tZ\t\tR1\t1\tH",
    "okeody\tf67r\tZ\t\tR2\t1\tH",
    "sarol\tf67r\tZ\t\tS1\t2\tH",
];

/// Under the default affix table class 10 is atomic (chy = ch + y, ol = o + l);
/// 33 ("tal"), 7 ("ko") and 9 ("keo") are not.
pub const TABLE_JSON: &str = r#"{
    "version": "fixture-1",
    "token_to_class": {"chy": 10, "ol": 10, "otaly": 33, "kol": 7, "okeody": 9},
    "class_to_tokens": {"10": ["chy", "ol"], "33": ["otaly"], "7": ["kol"], "9": ["okeody"]},
    "infrastructure_classes": [10]
}"#;

pub fn transcription_text() -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for row in TRANSCRIPTION_ROWS {
        out.push_str(row);
        out.push('\n');
    }
    out
}

pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Writes the fixture transcription and table into `dir`.
pub fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
    (
        write(dir, "transcription.tsv", &transcription_text()),
        write(dir, "classes.json", TABLE_JSON),
    )
}

/// PREFIXES = [qo, ch], SUFFIXES = [aiin, y].
pub fn small_decomposer() -> Decomposer {
    let table = AffixTable::new("small", ["qo", "ch"], ["aiin", "y"]).unwrap();
    Decomposer::new(Arc::new(table), UnprefixedPolicy::StripSuffix)
}

/// Against the small table: class 1 has middle "k", class 2 middle "t",
/// class 3 is atomic, class 4 has middle "ol".
pub const SMALL_TABLE_JSON: &str = r#"{
    "token_to_class": {
        "k": 1, "qok": 1, "qokaiin": 1, "kaiin": 1,
        "t": 2, "qot": 2,
        "chy": 3, "qoy": 3,
        "ol": 4, "cholaiin": 4
    },
    "class_to_tokens": {
        "1": ["k", "qok", "qokaiin", "kaiin"],
        "2": ["t", "qot"],
        "3": ["chy", "qoy"],
        "4": ["ol", "cholaiin"]
    }
}"#;

pub fn small_classifier() -> Classifier {
    let table = ClassTable::from_json(SMALL_TABLE_JSON, "<small>").unwrap();
    Classifier::from_table(table, &small_decomposer(), RoleMap::default())
}
