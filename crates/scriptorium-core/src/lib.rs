//! # scriptorium-core
//!
//! Foundation crate for the Scriptorium analysis engine.
//! Defines errors, configuration, tracing setup, and shared collection types.
//! `scriptorium-analysis` depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::ScriptoriumConfig;
pub use errors::{PipelineError, ScriptoriumErrorCode};
