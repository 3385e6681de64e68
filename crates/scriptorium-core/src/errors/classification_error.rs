//! Classification table errors.

use super::error_code::{self, ScriptoriumErrorCode};

/// Errors raised while loading the frozen classification table.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("Cannot read classification table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Classification table {path} is not valid JSON: {message}")]
    Parse { path: String, message: String },

    #[error("Classification table is inconsistent: {0}")]
    Inconsistent(String),

    #[error("Role id-sets overlap: class {class_id} is assigned to both {first} and {second}")]
    OverlappingRoles {
        class_id: u16,
        first: &'static str,
        second: &'static str,
    },
}

impl ScriptoriumErrorCode for ClassificationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::CLASSIFICATION_UNREADABLE,
            _ => error_code::CLASSIFICATION_ERROR,
        }
    }
}
