//! Identifiers shared by the loader, the classifier, and the survivor engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Instruction class id as stored in the classification table.
pub type ClassId = u16;

/// Stable record identifier.
///
/// Line records render as `<folio>:<line>`, paragraph records as `<folio>:p<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn line(folio: &str, line: u32) -> Self {
        Self(format!("{folio}:{line}"))
    }

    pub fn paragraph(folio: &str, ordinal: u32) -> Self {
        Self(format!("{folio}:p{ordinal}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Textual system a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum System {
    /// Currier A.
    A,
    /// Currier B.
    B,
    /// Astronomical / zodiac / cosmological diagram pages.
    #[serde(rename = "AZC")]
    Azc,
}

impl System {
    /// Map the transcription's `language` column. Empty means AZC.
    pub fn from_language_code(code: &str) -> Option<Self> {
        match code.trim() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "" => Some(Self::Azc),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::Azc => "AZC",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
