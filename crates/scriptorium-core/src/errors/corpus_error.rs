//! Transcription loading errors.
//!
//! Only file-level problems are errors. Row-level problems are counted in the
//! loader's report and never abort a load.

use super::error_code::{self, ScriptoriumErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Cannot read transcription {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcription {path} is missing required column '{column}'")]
    MissingColumn { path: String, column: &'static str },

    #[error("Malformed transcription header in {path}: {message}")]
    Header { path: String, message: String },
}

impl ScriptoriumErrorCode for CorpusError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::CORPUS_UNREADABLE,
            Self::MissingColumn { .. } | Self::Header { .. } => error_code::CORPUS_ERROR,
        }
    }
}
