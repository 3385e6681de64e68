//! Corpus loader configuration.

use serde::{Deserialize, Serialize};

/// How tokens are grouped into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordGrouping {
    /// One record per (folio, line).
    #[default]
    Line,
    /// One record per gallows-initial paragraph.
    Paragraph,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CorpusConfig {
    /// Transcriber track to keep. Default: "H".
    pub primary_track: Option<String>,
    /// Substring marking damaged/uncertain tokens. Default: "*".
    pub uncertainty_marker: Option<String>,
    /// Characters that open a paragraph when a line starts with them. Default: "ktpf".
    pub gallows: Option<String>,
    /// Record grouping used by the session. Default: line.
    pub grouping: Option<RecordGrouping>,
}

impl CorpusConfig {
    pub fn effective_primary_track(&self) -> &str {
        self.primary_track.as_deref().unwrap_or("H")
    }

    pub fn effective_uncertainty_marker(&self) -> &str {
        self.uncertainty_marker.as_deref().unwrap_or("*")
    }

    pub fn effective_gallows(&self) -> Vec<char> {
        self.gallows
            .as_deref()
            .unwrap_or("ktpf")
            .chars()
            .collect()
    }

    pub fn effective_grouping(&self) -> RecordGrouping {
        self.grouping.unwrap_or_default()
    }
}
