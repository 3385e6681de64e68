//! Error handling for Scriptorium.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod classification_error;
pub mod config_error;
pub mod corpus_error;
pub mod error_code;
pub mod morphology_error;
pub mod pipeline_error;

pub use analysis_error::AnalysisError;
pub use classification_error::ClassificationError;
pub use config_error::ConfigError;
pub use corpus_error::CorpusError;
pub use error_code::ScriptoriumErrorCode;
pub use morphology_error::MorphologyError;
pub use pipeline_error::PipelineError;
