//! Permutation significance of clustering quality.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use scriptorium_core::errors::AnalysisError;
use scriptorium_core::tracing::metrics;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;
use tracing::{debug, field, info, info_span};

use super::activation::ActivationMatrix;
use super::clustering::clustering_quality;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermutationResult {
    /// Silhouette of the observed matrix's k-cut.
    pub observed: f64,
    pub permutations: u32,
    pub seed: u64,
    pub null_mean: f64,
    pub null_std: f64,
    /// `None` when the null distribution has no spread.
    pub z_score: Option<f64>,
    /// (1 + #{null ≥ observed}) / (1 + permutations).
    pub p_value: f64,
    /// One-sided normal approximation from the z-score.
    pub normal_p_value: Option<f64>,
}

impl PermutationResult {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Compare the observed clustering quality against `permutations`
/// row-sum-preserving shuffles. Shuffle `i` is seeded with `seed + i`, so the
/// result does not depend on scheduling.
pub fn permutation_test(
    matrix: &ActivationMatrix,
    k: usize,
    permutations: u32,
    seed: u64,
) -> Result<PermutationResult, AnalysisError> {
    if permutations == 0 {
        return Err(AnalysisError::NoPermutations);
    }
    let start = Instant::now();
    let span = info_span!(
        "permutation_test",
        rows = matrix.n_rows(),
        permutations,
        permutation_ms = field::Empty
    );
    let _guard = span.enter();

    let observed = clustering_quality(matrix, k)?;
    let null: Vec<f64> = (0..permutations)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(u64::from(i)));
            clustering_quality(&matrix.shuffled_rows(&mut rng), k)
        })
        .collect::<Result<_, _>>()?;

    let exceed = null.iter().filter(|&&q| q >= observed).count();
    let p_value = (1 + exceed) as f64 / (1 + permutations as usize) as f64;

    let null_mean = null.iter().mean();
    let null_std = if null.len() > 1 { null.iter().std_dev() } else { 0.0 };
    let z_score = (null_std > 0.0).then(|| (observed - null_mean) / null_std);
    let normal_p_value = z_score.and_then(|z| {
        Normal::new(0.0, 1.0).ok().map(|standard| 1.0 - standard.cdf(z))
    });

    let elapsed = start.elapsed().as_millis() as u64;
    span.record(metrics::PERMUTATION_MS, elapsed);
    info!(observed, p_value, null_mean, "permutation test done");
    debug!(elapsed_ms = elapsed, "permutation phase done");

    Ok(PermutationResult {
        observed,
        permutations,
        seed,
        null_mean,
        null_std,
        z_score,
        p_value,
        normal_p_value,
    })
}
