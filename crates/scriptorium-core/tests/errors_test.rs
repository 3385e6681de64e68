//! Tests for the Scriptorium error handling system.

use std::collections::HashSet;

use scriptorium_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let config = ConfigError::FileNotFound { path: "/tmp".into() };
    assert!(!config.error_code().is_empty());

    let morphology = MorphologyError::EmptyAffix {
        slot: "prefix",
        version: "1".into(),
    };
    assert!(!morphology.error_code().is_empty());

    let corpus = CorpusError::MissingColumn {
        path: "t.tsv".into(),
        column: "word",
    };
    assert!(!corpus.error_code().is_empty());

    let classification = ClassificationError::Inconsistent("x".into());
    assert!(!classification.error_code().is_empty());

    let analysis = AnalysisError::NoPermutations;
    assert!(!analysis.error_code().is_empty());
}

#[test]
fn test_from_conversions_preserve_codes() {
    let corpus = CorpusError::Io {
        path: "missing.tsv".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    let code = corpus.error_code();
    let pipeline: PipelineError = corpus.into();
    assert!(matches!(pipeline, PipelineError::Corpus(CorpusError::Io { .. })));
    assert_eq!(pipeline.error_code(), code);

    let classification: PipelineError = ClassificationError::Io {
        path: "table.json".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    }
    .into();
    assert_eq!(classification.error_code(), error_code::CLASSIFICATION_UNREADABLE);

    let analysis: PipelineError = AnalysisError::EmptyMatrix.into();
    assert_eq!(analysis.error_code(), error_code::ANALYSIS_ERROR);
}

#[test]
fn test_unreadable_inputs_have_distinct_codes() {
    let codes: HashSet<&str> = [
        error_code::CORPUS_UNREADABLE,
        error_code::CORPUS_ERROR,
        error_code::CLASSIFICATION_UNREADABLE,
        error_code::CLASSIFICATION_ERROR,
    ]
    .into_iter()
    .collect();
    assert_eq!(codes.len(), 4);
}

#[test]
fn test_coded_string_format() {
    let err = AnalysisError::InvalidClusterCount { k: 5, rows: 2 };
    assert_eq!(
        err.coded_string(),
        "[ANALYSIS_ERROR] Invalid cluster count 5 for 2 rows"
    );
}
