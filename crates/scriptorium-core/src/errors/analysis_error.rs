//! Graph analysis errors.

use super::error_code::{self, ScriptoriumErrorCode};

/// Invalid parameters handed to the co-occurrence / graph layer.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Cannot cluster an empty activation matrix")]
    EmptyMatrix,

    #[error("Invalid cluster count {k} for {rows} rows")]
    InvalidClusterCount { k: usize, rows: usize },

    #[error("Permutation test needs at least one permutation")]
    NoPermutations,

    #[error("Thread pool construction failed: {0}")]
    ThreadPool(String),
}

impl ScriptoriumErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        error_code::ANALYSIS_ERROR
    }
}
