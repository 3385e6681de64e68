//! ScriptoriumErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so downstream scripts can branch on a
/// stable code string instead of parsing messages.
pub trait ScriptoriumErrorCode {
    /// Returns the error code string (e.g., "CORPUS_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const MORPHOLOGY_ERROR: &str = "MORPHOLOGY_ERROR";
pub const CORPUS_ERROR: &str = "CORPUS_ERROR";
pub const CORPUS_UNREADABLE: &str = "CORPUS_UNREADABLE";
pub const CLASSIFICATION_ERROR: &str = "CLASSIFICATION_ERROR";
pub const CLASSIFICATION_UNREADABLE: &str = "CLASSIFICATION_UNREADABLE";
pub const ANALYSIS_ERROR: &str = "ANALYSIS_ERROR";
