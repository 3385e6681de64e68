//! Persisted token→class table.

use std::collections::BTreeMap;
use std::path::Path;

use scriptorium_core::errors::ClassificationError;
use scriptorium_core::types::collections::FxHashMap;
use scriptorium_core::types::ClassId;
use serde::{Deserialize, Serialize};

/// The frozen classification artifact as stored on disk.
///
/// Class ids are JSON object keys, so `class_to_tokens` round-trips through
/// string keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub token_to_class: BTreeMap<String, ClassId>,
    pub class_to_tokens: BTreeMap<ClassId, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic_classes: Option<Vec<ClassId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infrastructure_classes: Option<Vec<ClassId>>,
}

impl ClassTable {
    /// Read, parse, normalize and validate a table file.
    pub fn load(path: &Path) -> Result<Self, ClassificationError> {
        let content = std::fs::read_to_string(path).map_err(|source| ClassificationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Parse a table from JSON text. `source` names it in errors.
    pub fn from_json(json: &str, source: &str) -> Result<Self, ClassificationError> {
        let table: Self = serde_json::from_str(json).map_err(|e| ClassificationError::Parse {
            path: source.to_string(),
            message: e.to_string(),
        })?;
        let table = table.normalized()?;
        table.validate()?;
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Lowercase every token. Two spellings that collapse onto one token
    /// must agree on the class.
    fn normalized(self) -> Result<Self, ClassificationError> {
        let mut token_to_class = BTreeMap::new();
        for (token, class_id) in self.token_to_class {
            let lowered = token.to_lowercase();
            if let Some(previous) = token_to_class.insert(lowered.clone(), class_id) {
                if previous != class_id {
                    return Err(ClassificationError::Inconsistent(format!(
                        "token '{lowered}' is mapped to both class {previous} and class {class_id}"
                    )));
                }
            }
        }
        let class_to_tokens = self
            .class_to_tokens
            .into_iter()
            .map(|(class_id, members)| {
                let mut members: Vec<String> = members.iter().map(|m| m.to_lowercase()).collect();
                members.sort();
                members.dedup();
                (class_id, members)
            })
            .collect();
        Ok(Self {
            version: self.version,
            token_to_class,
            class_to_tokens,
            atomic_classes: self.atomic_classes,
            infrastructure_classes: self.infrastructure_classes,
        })
    }

    /// Both directions of the mapping must describe the same partition.
    pub fn validate(&self) -> Result<(), ClassificationError> {
        let mut owner: FxHashMap<&str, ClassId> = FxHashMap::default();
        for (class_id, members) in &self.class_to_tokens {
            for member in members {
                if let Some(other) = owner.insert(member.as_str(), *class_id) {
                    if other != *class_id {
                        return Err(ClassificationError::Inconsistent(format!(
                            "token '{member}' is a member of both class {other} and class {class_id}"
                        )));
                    }
                }
                match self.token_to_class.get(member) {
                    Some(mapped) if mapped == class_id => {}
                    Some(mapped) => {
                        return Err(ClassificationError::Inconsistent(format!(
                            "token '{member}' is listed under class {class_id} but mapped to class {mapped}"
                        )))
                    }
                    None => {
                        return Err(ClassificationError::Inconsistent(format!(
                            "token '{member}' of class {class_id} has no token_to_class entry"
                        )))
                    }
                }
            }
        }
        for (token, class_id) in &self.token_to_class {
            if owner.get(token.as_str()) != Some(class_id) {
                return Err(ClassificationError::Inconsistent(format!(
                    "token '{token}' maps to class {class_id} but is missing from its member list"
                )));
            }
        }
        Ok(())
    }

    pub fn class_count(&self) -> usize {
        self.class_to_tokens.len()
    }

    pub fn token_count(&self) -> usize {
        self.token_to_class.len()
    }
}
