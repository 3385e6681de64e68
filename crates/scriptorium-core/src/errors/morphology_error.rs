//! Affix table errors.

use super::error_code::{self, ScriptoriumErrorCode};

/// Errors raised while building an affix table. Decomposition itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum MorphologyError {
    #[error("Empty {slot} entry in affix table {version}")]
    EmptyAffix { slot: &'static str, version: String },

    #[error("Duplicate {slot} entry '{affix}' in affix table {version}")]
    DuplicateAffix {
        slot: &'static str,
        affix: String,
        version: String,
    },

    #[error("{slot} entry '{affix}' in affix table {version} is not lowercase")]
    NotLowercase {
        slot: &'static str,
        affix: String,
        version: String,
    },
}

impl ScriptoriumErrorCode for MorphologyError {
    fn error_code(&self) -> &'static str {
        error_code::MORPHOLOGY_ERROR
    }
}
