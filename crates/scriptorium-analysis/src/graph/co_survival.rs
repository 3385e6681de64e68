//! Class co-survival graph and its degree distribution.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graph::{NodeIndex, UnGraph};
use scriptorium_core::types::collections::FxHashMap;
use scriptorium_core::types::ClassId;
use serde::{Deserialize, Serialize};

use crate::survivor::SurvivorSet;

/// Undirected graph over classes. Edge weight = number of survivor sets
/// containing both endpoints.
#[derive(Debug, Clone)]
pub struct CoSurvivalGraph {
    pub graph: UnGraph<ClassId, u32>,
    nodes: FxHashMap<ClassId, NodeIndex>,
}

/// Degree and weighted strength of one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDegree {
    pub class_id: ClassId,
    pub degree: usize,
    pub strength: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeDistribution {
    /// Ascending class id.
    pub classes: Vec<ClassDegree>,
    /// degree → number of classes with that degree.
    pub histogram: BTreeMap<usize, usize>,
    pub mean_degree: f64,
    pub density: f64,
}

impl CoSurvivalGraph {
    pub fn build(sets: &[SurvivorSet]) -> Self {
        let all: BTreeSet<ClassId> = sets.iter().flat_map(|s| s.classes.iter().copied()).collect();
        let mut graph = UnGraph::with_capacity(all.len(), 0);
        let mut nodes = FxHashMap::default();
        for class_id in all {
            nodes.insert(class_id, graph.add_node(class_id));
        }

        let mut pairs: FxHashMap<(ClassId, ClassId), u32> = FxHashMap::default();
        for set in sets {
            let classes: Vec<ClassId> = set.classes.iter().copied().collect();
            for (i, a) in classes.iter().enumerate() {
                for b in &classes[i + 1..] {
                    *pairs.entry((*a, *b)).or_insert(0) += 1;
                }
            }
        }
        let mut pairs: Vec<_> = pairs.into_iter().collect();
        pairs.sort_unstable();
        for ((a, b), weight) in pairs {
            if let (Some(&na), Some(&nb)) = (nodes.get(&a), nodes.get(&b)) {
                graph.add_edge(na, nb, weight);
            }
        }

        Self { graph, nodes }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of sets in which both classes survive. Zero if either is absent.
    pub fn weight(&self, a: ClassId, b: ClassId) -> u32 {
        match (self.nodes.get(&a), self.nodes.get(&b)) {
            (Some(&na), Some(&nb)) => self
                .graph
                .find_edge(na, nb)
                .and_then(|e| self.graph.edge_weight(e))
                .copied()
                .unwrap_or(0),
            _ => 0,
        }
    }

    pub fn neighbors(&self, class_id: ClassId) -> Vec<ClassId> {
        let Some(&node) = self.nodes.get(&class_id) else {
            return Vec::new();
        };
        let mut out: Vec<ClassId> = self.graph.neighbors(node).map(|n| self.graph[n]).collect();
        out.sort_unstable();
        out
    }

    pub fn degree_distribution(&self) -> DegreeDistribution {
        let mut classes: Vec<ClassDegree> = self
            .graph
            .node_indices()
            .map(|node| {
                let (degree, strength) = self
                    .graph
                    .edges(node)
                    .fold((0usize, 0u64), |(d, s), e| (d + 1, s + u64::from(*e.weight())));
                ClassDegree {
                    class_id: self.graph[node],
                    degree,
                    strength,
                }
            })
            .collect();
        classes.sort_by_key(|c| c.class_id);

        let mut histogram = BTreeMap::new();
        for c in &classes {
            *histogram.entry(c.degree).or_insert(0) += 1;
        }

        let n = classes.len();
        let mean_degree = if n == 0 {
            0.0
        } else {
            classes.iter().map(|c| c.degree).sum::<usize>() as f64 / n as f64
        };
        let density = if n < 2 {
            0.0
        } else {
            2.0 * self.edge_count() as f64 / (n * (n - 1)) as f64
        };

        DegreeDistribution {
            classes,
            histogram,
            mean_degree,
            density,
        }
    }
}
