//! Token→class and class→role lookups with per-class flags cached at load.

use std::path::Path;
use std::time::Instant;

use scriptorium_core::errors::ClassificationError;
use scriptorium_core::tracing::metrics;
use scriptorium_core::types::collections::{BTreeMap, BTreeSet, FxHashMap};
use scriptorium_core::types::ClassId;
use serde::{Deserialize, Serialize};
use tracing::{debug, field, info, info_span, warn};

use crate::morphology::Decomposer;

use super::roles::{Role, RoleMap};
use super::table::ClassTable;

/// Result of looking a token up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Instruction(ClassId),
    /// Absent from the table.
    OutsideGrammar,
}

impl Classification {
    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            Self::Instruction(id) => Some(*id),
            Self::OutsideGrammar => None,
        }
    }
}

/// One instruction class with its derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: ClassId,
    pub role: Role,
    /// Sorted member tokens.
    pub members: Vec<String>,
    /// No member has a non-empty middle.
    pub atomic: bool,
    pub infrastructure: bool,
}

/// Read-only classification over a frozen table.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: ClassTable,
    roles: RoleMap,
    classes: BTreeMap<ClassId, ClassInfo>,
    lookup: FxHashMap<String, ClassId>,
}

impl Classifier {
    /// Load the table from disk with the default role map.
    pub fn load(path: &Path, decomposer: &Decomposer) -> Result<Self, ClassificationError> {
        Ok(Self::from_table(
            ClassTable::load(path)?,
            decomposer,
            RoleMap::default(),
        ))
    }

    /// Build from an already validated table.
    pub fn from_table(table: ClassTable, decomposer: &Decomposer, roles: RoleMap) -> Self {
        let start = Instant::now();
        let span = info_span!("classifier_build", class_count = field::Empty);
        let _guard = span.enter();

        let infrastructure: BTreeSet<ClassId> = table
            .infrastructure_classes
            .iter()
            .flatten()
            .copied()
            .collect();
        for id in &infrastructure {
            if !table.class_to_tokens.contains_key(id) {
                warn!(class_id = id, "infrastructure class is not in the table");
            }
        }

        let mut classes = BTreeMap::new();
        for (id, members) in &table.class_to_tokens {
            let atomic =
                !members.is_empty() && members.iter().all(|m| !decomposer.extract(m).has_middle());
            classes.insert(
                *id,
                ClassInfo {
                    id: *id,
                    role: roles.get_role(*id),
                    members: members.clone(),
                    atomic,
                    infrastructure: infrastructure.contains(id),
                },
            );
        }

        if let Some(listed) = &table.atomic_classes {
            let listed: BTreeSet<ClassId> = listed.iter().copied().collect();
            let computed: BTreeSet<ClassId> = classes
                .values()
                .filter(|c| c.atomic)
                .map(|c| c.id)
                .collect();
            if listed != computed {
                warn!(
                    listed = ?listed,
                    computed = ?computed,
                    "listed atomic classes disagree with the decomposer; keeping computed flags"
                );
            }
        }

        let lookup = table
            .token_to_class
            .iter()
            .map(|(token, id)| (token.clone(), *id))
            .collect();

        span.record(metrics::CLASS_COUNT, classes.len());
        info!(
            classes = classes.len(),
            tokens = table.token_count(),
            version = table.version.as_deref().unwrap_or("unversioned"),
            "classification table loaded"
        );
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "classifier build done");

        Self {
            table,
            roles,
            classes,
            lookup,
        }
    }

    /// Look a token up. Case-insensitive.
    pub fn classify(&self, token: &str) -> Classification {
        match self.lookup.get(token.to_lowercase().as_str()) {
            Some(id) => Classification::Instruction(*id),
            None => Classification::OutsideGrammar,
        }
    }

    /// Total: unknown ids map to `Role::Unknown`.
    pub fn get_role(&self, class_id: ClassId) -> Role {
        self.roles.get_role(class_id)
    }

    pub fn class(&self, class_id: ClassId) -> Option<&ClassInfo> {
        self.classes.get(&class_id)
    }

    /// All classes in ascending id order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassInfo> + '_ {
        self.classes.values()
    }

    pub fn members(&self, class_id: ClassId) -> &[String] {
        self.classes
            .get(&class_id)
            .map(|c| c.members.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_atomic(&self, class_id: ClassId) -> bool {
        self.classes.get(&class_id).is_some_and(|c| c.atomic)
    }

    pub fn is_infrastructure(&self, class_id: ClassId) -> bool {
        self.classes.get(&class_id).is_some_and(|c| c.infrastructure)
    }

    pub fn atomic_classes(&self) -> Vec<ClassId> {
        self.classes.values().filter(|c| c.atomic).map(|c| c.id).collect()
    }

    /// Every classified token with its class, in token order.
    pub fn classified_tokens(&self) -> impl Iterator<Item = (&str, ClassId)> + '_ {
        self.table
            .token_to_class
            .iter()
            .map(|(token, id)| (token.as_str(), *id))
    }

    pub fn table(&self) -> &ClassTable {
        &self.table
    }

    pub fn roles(&self) -> &RoleMap {
        &self.roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(json: &str) -> Classifier {
        let table = ClassTable::from_json(json, "<test>").unwrap();
        Classifier::from_table(table, &Decomposer::with_default_table(), RoleMap::default())
    }

    const TABLE: &str = r#"{
        "token_to_class": {"qokaiin": 10, "chedy": 10, "otaly": 33, "chy": 7, "ol": 7},
        "class_to_tokens": {"10": ["qokaiin", "chedy"], "33": ["otaly"], "7": ["chy", "ol"]},
        "infrastructure_classes": [33]
    }"#;

    #[test]
    fn test_classify() {
        let c = classifier(TABLE);
        assert_eq!(c.classify("QOKAIIN"), Classification::Instruction(10));
        assert_eq!(c.classify("xyz"), Classification::OutsideGrammar);
        assert_eq!(c.classify("xyz").class_id(), None);
    }

    #[test]
    fn test_roles_and_flags() {
        let c = classifier(TABLE);
        assert_eq!(c.get_role(10), Role::CoreControl);
        assert_eq!(c.get_role(33), Role::EnergyOperator);
        assert_eq!(c.get_role(999), Role::Unknown);
        assert!(c.is_infrastructure(33));
        assert!(!c.is_infrastructure(10));
        // chy and ol are prefix + suffix only.
        assert!(c.is_atomic(7));
        // qokaiin keeps "k", chedy keeps "e".
        assert!(!c.is_atomic(10));
        assert!(!c.is_atomic(33));
        assert_eq!(c.atomic_classes(), vec![7]);
    }

    #[test]
    fn test_computed_atomic_wins_over_listed() {
        let json = r#"{
            "token_to_class": {"otaly": 33},
            "class_to_tokens": {"33": ["otaly"]},
            "atomic_classes": [33]
        }"#;
        assert!(!classifier(json).is_atomic(33));
    }

    #[test]
    fn test_members_of_unknown_class_is_empty() {
        let c = classifier(TABLE);
        assert!(c.members(500).is_empty());
        assert_eq!(c.members(10), &["chedy".to_string(), "qokaiin".to_string()]);
    }
}
