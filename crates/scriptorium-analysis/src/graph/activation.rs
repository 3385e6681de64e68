//! Binary vocabulary-element × class activation matrix.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::index::sample;
use rand::Rng;
use scriptorium_core::config::VocabularySlot;
use scriptorium_core::types::ClassId;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::corpus::Record;
use crate::survivor::SurvivorSet;

/// Rows are elements of one slot, columns are classes; both sorted.
/// Each row holds the sorted column indices of its set cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationMatrix {
    pub slot: VocabularySlot,
    pub elements: Vec<String>,
    pub classes: Vec<ClassId>,
    pub rows: Vec<Vec<u32>>,
}

impl ActivationMatrix {
    /// Cell (e, c) is set iff some record whose own vocabulary contains `e`
    /// has `c` in its survivor set. Records and sets pair by position.
    pub fn build(records: &[Record], sets: &[SurvivorSet], slot: VocabularySlot) -> Self {
        if records.len() != sets.len() {
            warn!(
                records = records.len(),
                sets = sets.len(),
                "record and survivor set counts differ; extra entries ignored"
            );
        }
        let mut cells: BTreeMap<&str, BTreeSet<ClassId>> = BTreeMap::new();
        for (record, set) in records.iter().zip(sets) {
            for element in record.vocabulary.values(slot) {
                cells
                    .entry(element.as_str())
                    .or_default()
                    .extend(set.classes.iter().copied());
            }
        }

        let classes: Vec<ClassId> = cells
            .values()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let column: BTreeMap<ClassId, u32> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (*c, i as u32))
            .collect();

        let mut elements = Vec::with_capacity(cells.len());
        let mut rows = Vec::with_capacity(cells.len());
        for (element, active) in cells {
            elements.push(element.to_string());
            rows.push(active.iter().filter_map(|c| column.get(c).copied()).collect());
        }

        Self {
            slot,
            elements,
            classes,
            rows,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_set(&self, row: usize, col: u32) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.binary_search(&col).is_ok())
    }

    pub fn row_sums(&self) -> Vec<usize> {
        self.rows.iter().map(Vec::len).collect()
    }

    /// Fraction of set cells.
    pub fn density(&self) -> f64 {
        let cells = self.n_rows() * self.n_cols();
        if cells == 0 {
            return 0.0;
        }
        self.rows.iter().map(Vec::len).sum::<usize>() as f64 / cells as f64
    }

    /// Copy with each row's set cells redrawn uniformly over the columns,
    /// keeping every row sum.
    pub fn shuffled_rows<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let n_cols = self.n_cols();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut cols: Vec<u32> = sample(rng, n_cols, row.len().min(n_cols))
                    .into_iter()
                    .map(|c| c as u32)
                    .collect();
                cols.sort_unstable();
                cols
            })
            .collect();
        Self {
            slot: self.slot,
            elements: self.elements.clone(),
            classes: self.classes.clone(),
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::Vocabulary;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use scriptorium_core::types::{RecordId, System};

    fn record(id: &str, middles: &[&str]) -> Record {
        let mut vocabulary = Vocabulary::new();
        vocabulary
            .middles
            .extend(middles.iter().map(|m| m.to_string()));
        Record {
            id: RecordId::from(id),
            folio: "f1r".into(),
            system: System::B,
            lines: vec![1],
            words: Vec::new(),
            vocabulary,
        }
    }

    fn set(id: &str, classes: &[ClassId]) -> SurvivorSet {
        SurvivorSet {
            record_id: RecordId::from(id),
            classes: classes.iter().copied().collect(),
            tokens: Default::default(),
            legal_middle_count: 0,
        }
    }

    fn matrix() -> ActivationMatrix {
        ActivationMatrix::build(
            &[record("a", &["k", "t"]), record("b", &["t", "e"])],
            &[set("a", &[1, 2]), set("b", &[5])],
            VocabularySlot::Middle,
        )
    }

    #[test]
    fn test_build() {
        let m = matrix();
        assert_eq!(m.elements, vec!["e", "k", "t"]);
        assert_eq!(m.classes, vec![1, 2, 5]);
        assert_eq!(m.rows, vec![vec![2], vec![0, 1], vec![0, 1, 2]]);
        assert!(m.is_set(1, 0));
        assert!(!m.is_set(1, 2));
        assert!((m.density() - 6.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_serialized_shape() {
        let json = matrix().to_json().unwrap();
        assert!(json.starts_with(r#"{"slot":"middle","elements":["e","k","t"],"classes":[1,2,5]"#));
    }

    #[test]
    fn test_shuffle_preserves_row_sums() {
        let m = matrix();
        let mut rng = StdRng::seed_from_u64(7);
        let shuffled = m.shuffled_rows(&mut rng);
        assert_eq!(shuffled.row_sums(), m.row_sums());
        assert!(shuffled.rows.iter().all(|r| r.windows(2).all(|w| w[0] < w[1])));
    }
}
