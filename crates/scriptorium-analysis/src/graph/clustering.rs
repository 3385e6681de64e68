//! Average-linkage (UPGMA) clustering of activation rows under Jaccard distance.
//!
//! Merges are found with the nearest-neighbor chain, which is exact for
//! average linkage and needs O(n²) time and memory.

use rayon::prelude::*;
use scriptorium_core::errors::AnalysisError;
use serde::{Deserialize, Serialize};

use super::activation::ActivationMatrix;

/// Jaccard distance between two sorted index sets. Two empty sets are identical.
pub fn jaccard_distance(a: &[u32], b: &[u32]) -> f64 {
    let (mut i, mut j, mut inter) = (0, 0, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                inter += 1;
                i += 1;
                j += 1;
            }
        }
    }
    let union = a.len() + b.len() - inter;
    if union == 0 {
        0.0
    } else {
        1.0 - inter as f64 / union as f64
    }
}

/// Dense symmetric distance matrix.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Pairwise Jaccard distances between rows, computed in parallel.
    pub fn jaccard(rows: &[Vec<u32>]) -> Self {
        let n = rows.len();
        let values: Vec<f64> = (0..n * n)
            .into_par_iter()
            .map(|cell| {
                let (i, j) = (cell / n, cell % n);
                if i == j {
                    0.0
                } else {
                    jaccard_distance(&rows[i], &rows[j])
                }
            })
            .collect();
        Self { n, values }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.n + j] = value;
        self.values[j * self.n + i] = value;
    }
}

/// One agglomeration step. Leaves are `0..n`; the cluster formed by merge
/// `i` has id `n + i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dendrogram {
    pub leaves: usize,
    /// Non-decreasing in distance.
    pub merges: Vec<Merge>,
}

impl Dendrogram {
    /// Build the full UPGMA hierarchy.
    pub fn upgma(distances: &DistanceMatrix) -> Self {
        let n = distances.len();
        let mut d = distances.clone();
        let mut size = vec![1usize; n];
        let mut active = vec![true; n];
        let mut remaining = n;
        let mut chain: Vec<usize> = Vec::with_capacity(n);
        // (kept slot, absorbed slot, distance, merged size)
        let mut raw: Vec<(usize, usize, f64, usize)> = Vec::with_capacity(n.saturating_sub(1));

        while remaining > 1 {
            if chain.is_empty() {
                if let Some(start) = active.iter().position(|&a| a) {
                    chain.push(start);
                }
            }
            let Some(&a) = chain.last() else { break };
            let previous = chain.len().checked_sub(2).map(|i| chain[i]);

            // Nearest active neighbor of `a`; ties prefer the chain predecessor,
            // then the lowest index.
            let mut best: Option<(usize, f64)> = previous.map(|p| (p, d.get(a, p)));
            for k in 0..n {
                if k == a || !active[k] {
                    continue;
                }
                let dist = d.get(a, k);
                match best {
                    Some((_, bd)) if dist >= bd => {}
                    _ => best = Some((k, dist)),
                }
            }
            let Some((b, dist)) = best else { break };

            if Some(b) == previous {
                chain.pop();
                chain.pop();
                let (keep, drop) = if a < b { (a, b) } else { (b, a) };
                let merged = size[keep] + size[drop];
                for k in 0..n {
                    if active[k] && k != keep && k != drop {
                        let updated = (size[keep] as f64 * d.get(keep, k)
                            + size[drop] as f64 * d.get(drop, k))
                            / merged as f64;
                        d.set(keep, k, updated);
                    }
                }
                active[drop] = false;
                size[keep] = merged;
                remaining -= 1;
                raw.push((keep, drop, dist, merged));
            } else {
                chain.push(b);
            }
        }

        // Stable: ties keep discovery order, so a cluster is created before it is used.
        raw.sort_by(|x, y| x.2.total_cmp(&y.2));

        let mut cluster_of: Vec<usize> = (0..n).collect();
        let mut merges = Vec::with_capacity(raw.len());
        for (i, (keep, drop, distance, size)) in raw.into_iter().enumerate() {
            let (l, r) = (cluster_of[keep], cluster_of[drop]);
            merges.push(Merge {
                left: l.min(r),
                right: l.max(r),
                distance,
                size,
            });
            cluster_of[keep] = n + i;
        }

        Self { leaves: n, merges }
    }

    /// Flat cluster label per leaf after keeping `k` clusters. Labels are
    /// `0..k`, numbered by first appearance in leaf order.
    pub fn cut(&self, k: usize) -> Result<Vec<usize>, AnalysisError> {
        if k == 0 || k > self.leaves {
            return Err(AnalysisError::InvalidClusterCount {
                k,
                rows: self.leaves,
            });
        }
        // Nodes are leaves then merged clusters; each merge points its
        // children at the new cluster id.
        let mut parent: Vec<usize> = (0..self.leaves + self.merges.len()).collect();
        for (i, merge) in self.merges.iter().take(self.leaves - k).enumerate() {
            parent[merge.left] = self.leaves + i;
            parent[merge.right] = self.leaves + i;
        }
        let mut label_of_root = vec![usize::MAX; parent.len()];
        let mut next = 0;
        let mut labels = Vec::with_capacity(self.leaves);
        for leaf in 0..self.leaves {
            let root = find(&mut parent, leaf);
            if label_of_root[root] == usize::MAX {
                label_of_root[root] = next;
                next += 1;
            }
            labels.push(label_of_root[root]);
        }
        Ok(labels)
    }
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

/// Mean silhouette coefficient. Members of singleton clusters score 0,
/// and a single cluster scores 0 overall.
pub fn silhouette(distances: &DistanceMatrix, labels: &[usize]) -> f64 {
    let n = labels.len();
    let k = labels.iter().copied().max().map_or(0, |m| m + 1);
    if n == 0 || k < 2 {
        return 0.0;
    }
    let mut cluster_size = vec![0usize; k];
    for &l in labels {
        cluster_size[l] += 1;
    }

    let total: f64 = (0..n)
        .into_par_iter()
        .map(|i| {
            let own = labels[i];
            if cluster_size[own] < 2 {
                return 0.0;
            }
            let mut sums = vec![0.0f64; k];
            for j in 0..n {
                if j != i {
                    sums[labels[j]] += distances.get(i, j);
                }
            }
            let a = sums[own] / (cluster_size[own] - 1) as f64;
            let b = (0..k)
                .filter(|&c| c != own && cluster_size[c] > 0)
                .map(|c| sums[c] / cluster_size[c] as f64)
                .fold(f64::INFINITY, f64::min);
            let denom = a.max(b);
            if denom > 0.0 && b.is_finite() {
                (b - a) / denom
            } else {
                0.0
            }
        })
        .sum();
    total / n as f64
}

/// Dendrogram, flat cut and cut quality for one activation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringResult {
    pub k: usize,
    /// Activation row elements, aligned with `labels`.
    pub elements: Vec<String>,
    pub labels: Vec<usize>,
    pub silhouette: f64,
    pub dendrogram: Dendrogram,
}

impl ClusteringResult {
    /// Elements grouped by flat cluster label.
    pub fn clusters(&self) -> Vec<Vec<&str>> {
        let mut out: Vec<Vec<&str>> = vec![Vec::new(); self.k];
        for (element, &label) in self.elements.iter().zip(&self.labels) {
            if let Some(members) = out.get_mut(label) {
                members.push(element.as_str());
            }
        }
        out
    }
}

/// Cluster activation rows by class profile and cut into `k` groups.
pub fn cluster(matrix: &ActivationMatrix, k: usize) -> Result<ClusteringResult, AnalysisError> {
    if matrix.is_empty() {
        return Err(AnalysisError::EmptyMatrix);
    }
    let distances = DistanceMatrix::jaccard(&matrix.rows);
    let dendrogram = Dendrogram::upgma(&distances);
    let labels = dendrogram.cut(k)?;
    let silhouette = silhouette(&distances, &labels);
    Ok(ClusteringResult {
        k,
        elements: matrix.elements.clone(),
        labels,
        silhouette,
        dendrogram,
    })
}

/// Silhouette of the `k`-cut, without keeping the hierarchy.
pub fn clustering_quality(matrix: &ActivationMatrix, k: usize) -> Result<f64, AnalysisError> {
    cluster(matrix, k).map(|r| r.silhouette)
}
