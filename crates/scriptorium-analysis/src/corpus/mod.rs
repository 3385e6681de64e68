//! Corpus loading: transcription reader, record grouping, system filters.

pub mod reader;
pub mod records;
pub mod types;

use std::io::Read;
use std::path::Path;

use scriptorium_core::config::{CorpusConfig, RecordGrouping};
use scriptorium_core::errors::CorpusError;
use scriptorium_core::types::System;

use crate::morphology::Decomposer;

pub use records::{group_by_line, group_by_paragraph};
pub use types::{LoadReport, Record, Token};

/// The filtered primary-track transcription.
#[derive(Debug, Clone)]
pub struct Corpus {
    tokens: Vec<Token>,
    report: LoadReport,
    gallows: Vec<char>,
}

impl Corpus {
    /// Read and filter a transcription file.
    pub fn load(path: &Path, config: &CorpusConfig) -> Result<Self, CorpusError> {
        let (tokens, report) = reader::read_transcription(path, config)?;
        Ok(Self::from_tokens(tokens, report, config.effective_gallows()))
    }

    /// Read and filter a transcription from any reader. `source` names it in errors.
    pub fn read_from<R: Read>(
        reader: R,
        source: &str,
        config: &CorpusConfig,
    ) -> Result<Self, CorpusError> {
        let (tokens, report) = reader::read_transcription_from(reader, source, config)?;
        Ok(Self::from_tokens(tokens, report, config.effective_gallows()))
    }

    pub fn from_tokens(tokens: Vec<Token>, report: LoadReport, gallows: Vec<char>) -> Self {
        Self {
            tokens,
            report,
            gallows,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn gallows(&self) -> &[char] {
        &self.gallows
    }

    /// Tokens of one system, in file order.
    pub fn tokens_in(&self, system: System) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(move |t| t.system == system)
    }

    /// Records under the given grouping, optionally restricted to one system.
    pub fn records(
        &self,
        grouping: RecordGrouping,
        system: Option<System>,
        decomposer: &Decomposer,
    ) -> Vec<Record> {
        let records = match grouping {
            RecordGrouping::Line => group_by_line(&self.tokens, decomposer),
            RecordGrouping::Paragraph => {
                group_by_paragraph(&self.tokens, &self.gallows, decomposer)
            }
        };
        match system {
            Some(system) => records.into_iter().filter(|r| r.system == system).collect(),
            None => records,
        }
    }
}
