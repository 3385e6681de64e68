//! Pipeline errors: the aggregate of every subsystem error.

use super::error_code::ScriptoriumErrorCode;
use super::{AnalysisError, ClassificationError, ConfigError, CorpusError, MorphologyError};

/// Errors that can abort a batch run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Morphology error: {0}")]
    Morphology(#[from] MorphologyError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

impl ScriptoriumErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Morphology(e) => e.error_code(),
            Self::Corpus(e) => e.error_code(),
            Self::Classification(e) => e.error_code(),
            Self::Analysis(e) => e.error_code(),
        }
    }
}
