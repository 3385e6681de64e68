//! Records whose survivor sets induce the same class tuple.

use std::collections::BTreeMap;

use scriptorium_core::types::{ClassId, RecordId};
use serde::{Deserialize, Serialize};

use crate::survivor::SurvivorSet;

/// Records sharing one canonical class tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroup {
    pub classes: Vec<ClassId>,
    pub records: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub total_records: usize,
    pub distinct_tuples: usize,
    /// Records that share their tuple with at least one other record.
    pub colliding_records: usize,
    /// distinct_tuples / total_records; 1.0 for an empty batch.
    pub uniqueness: f64,
    /// Largest groups first, ties by tuple.
    pub groups: Vec<CollisionGroup>,
}

/// Group records by canonical class tuple. Collisions are data, not errors.
pub fn collision_report(sets: &[SurvivorSet]) -> CollisionReport {
    let mut by_tuple: BTreeMap<Vec<ClassId>, Vec<RecordId>> = BTreeMap::new();
    for set in sets {
        by_tuple
            .entry(set.class_tuple())
            .or_default()
            .push(set.record_id.clone());
    }
    let distinct_tuples = by_tuple.len();

    let mut groups: Vec<CollisionGroup> = by_tuple
        .into_iter()
        .filter(|(_, records)| records.len() > 1)
        .map(|(classes, records)| CollisionGroup { classes, records })
        .collect();
    groups.sort_by(|a, b| {
        b.records
            .len()
            .cmp(&a.records.len())
            .then_with(|| a.classes.cmp(&b.classes))
    });
    let colliding_records = groups.iter().map(|g| g.records.len()).sum();

    CollisionReport {
        total_records: sets.len(),
        distinct_tuples,
        colliding_records,
        uniqueness: if sets.is_empty() {
            1.0
        } else {
            distinct_tuples as f64 / sets.len() as f64
        },
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(id: &str, classes: &[ClassId]) -> SurvivorSet {
        SurvivorSet {
            record_id: RecordId::from(id),
            classes: classes.iter().copied().collect(),
            tokens: Default::default(),
            legal_middle_count: 0,
        }
    }

    #[test]
    fn test_equal_tuples_are_counted() {
        let report = collision_report(&[
            set("a", &[1, 2]),
            set("b", &[2, 1]),
            set("c", &[3]),
            set("d", &[1, 2]),
            set("e", &[3]),
            set("f", &[4]),
        ]);
        assert_eq!(report.total_records, 6);
        assert_eq!(report.distinct_tuples, 3);
        assert_eq!(report.colliding_records, 5);
        assert_eq!(report.groups.len(), 2);
        assert_eq!(report.groups[0].classes, vec![1, 2]);
        assert_eq!(
            report.groups[0].records,
            vec![RecordId::from("a"), RecordId::from("b"), RecordId::from("d")]
        );
        assert!((report.uniqueness - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_batch() {
        let report = collision_report(&[]);
        assert_eq!(report.distinct_tuples, 0);
        assert!(report.groups.is_empty());
        assert_eq!(report.uniqueness, 1.0);
    }
}
