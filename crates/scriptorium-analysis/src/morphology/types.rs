//! Parse types.

use std::collections::BTreeSet;

use scriptorium_core::config::VocabularySlot;
use serde::{Deserialize, Serialize};

/// The MIDDLE slot of a parse that consumed at least one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Middle {
    /// Prefix and suffix together consumed the whole token.
    Empty,
    Value(String),
}

impl Middle {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Value(v) => v,
        }
    }
}

/// Three-slot decomposition of one token.
///
/// `None` means the slot is unmatched. `middle` is `None` only for the empty token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MorphologicalParse {
    pub prefix: Option<String>,
    pub middle: Option<Middle>,
    pub suffix: Option<String>,
}

impl MorphologicalParse {
    /// The MIDDLE value, if the token has a non-empty one.
    pub fn middle_value(&self) -> Option<&str> {
        match &self.middle {
            Some(Middle::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// False for the empty sentinel and for the empty token.
    pub fn has_middle(&self) -> bool {
        self.middle_value().is_some()
    }

    /// Value of one slot, with absent and empty-sentinel middles both `None`.
    pub fn slot(&self, slot: VocabularySlot) -> Option<&str> {
        match slot {
            VocabularySlot::Prefix => self.prefix.as_deref(),
            VocabularySlot::Middle => self.middle_value(),
            VocabularySlot::Suffix => self.suffix.as_deref(),
        }
    }

    /// prefix + middle + suffix, with the empty sentinel rendered as "".
    pub fn reassemble(&self) -> String {
        let mut out = String::new();
        if let Some(p) = &self.prefix {
            out.push_str(p);
        }
        if let Some(m) = &self.middle {
            out.push_str(m.as_str());
        }
        if let Some(s) = &self.suffix {
            out.push_str(s);
        }
        out
    }
}

/// Affix values observed in a record, or legal for one.
///
/// Sets are ordered so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub prefixes: BTreeSet<String>,
    pub middles: BTreeSet<String>,
    pub suffixes: BTreeSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the slot values of one parse. The empty sentinel adds no middle.
    pub fn add_parse(&mut self, parse: &MorphologicalParse) {
        if let Some(p) = &parse.prefix {
            self.prefixes.insert(p.clone());
        }
        if let Some(m) = parse.middle_value() {
            self.middles.insert(m.to_string());
        }
        if let Some(s) = &parse.suffix {
            self.suffixes.insert(s.clone());
        }
    }

    pub fn values(&self, slot: VocabularySlot) -> &BTreeSet<String> {
        match slot {
            VocabularySlot::Prefix => &self.prefixes,
            VocabularySlot::Middle => &self.middles,
            VocabularySlot::Suffix => &self.suffixes,
        }
    }

    /// Whether `value` is legal in `slot`. An absent value is always legal.
    pub fn admits(&self, slot: VocabularySlot, value: Option<&str>) -> bool {
        match value {
            None => true,
            Some(v) => self.values(slot).contains(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.middles.is_empty() && self.suffixes.is_empty()
    }
}

impl FromIterator<MorphologicalParse> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = MorphologicalParse>>(iter: I) -> Self {
        let mut vocab = Self::new();
        for parse in iter {
            vocab.add_parse(&parse);
        }
        vocab
    }
}
