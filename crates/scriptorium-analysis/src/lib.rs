//! # scriptorium-analysis
//!
//! Analysis engine for transcribed manuscript text.
//! Decomposes tokens into prefix/middle/suffix, loads and groups the
//! transcription, maps tokens to instruction classes, computes per-record
//! survivor sets, and analyzes batches of survivor sets as graphs.

pub mod classification;
pub mod corpus;
pub mod graph;
pub mod morphology;
pub mod session;
pub mod survivor;

pub use classification::{ClassTable, Classification, Classifier, Role};
pub use corpus::{Corpus, Record, Token};
pub use morphology::{AffixTable, Decomposer, Middle, MorphologicalParse};
pub use session::AnalysisSession;
pub use survivor::{LegalVocabulary, SurvivorEngine, SurvivorSet, SurvivorStrategy};
