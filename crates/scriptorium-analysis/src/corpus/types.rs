//! Corpus types.

use scriptorium_core::types::{RecordId, System};
use serde::{Deserialize, Serialize};

use crate::morphology::Vocabulary;

/// One retained transcription token. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub folio: String,
    pub section: String,
    pub line: u32,
    /// Placement code, e.g. `P`, `L1`, `R2`, `C`, `S1`.
    pub placement: String,
    pub system: System,
    pub transcriber: String,
}

/// A run of tokens sharing a (folio, line) or a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub folio: String,
    /// System of the record's first token.
    pub system: System,
    /// Line numbers covered, in order of appearance.
    pub lines: Vec<u32>,
    pub words: Vec<String>,
    /// Prefix/middle/suffix values present among the record's tokens.
    pub vocabulary: Vocabulary,
}

impl Record {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Counters from one load. Malformed rows are skipped, never fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub tokens_retained: usize,
    /// Rows from transcriber tracks other than the primary one.
    pub other_track: usize,
    /// Tokens carrying the uncertainty marker.
    pub uncertain: usize,
    pub malformed_field_count: usize,
    pub malformed_line_number: usize,
    pub malformed_empty_word: usize,
    pub malformed_language: usize,
    /// Rows the CSV layer could not decode at all.
    pub malformed_encoding: usize,
}

impl LoadReport {
    pub fn malformed_total(&self) -> usize {
        self.malformed_field_count
            + self.malformed_line_number
            + self.malformed_empty_word
            + self.malformed_language
            + self.malformed_encoding
    }

    /// True when no row was skipped as malformed.
    pub fn is_clean(&self) -> bool {
        self.malformed_total() == 0
    }
}
