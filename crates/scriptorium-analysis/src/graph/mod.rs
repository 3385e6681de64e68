//! Co-occurrence analysis over batches of survivor sets.
//!
//! Everything here is read-only over its inputs.

pub mod activation;
pub mod clustering;
pub mod co_survival;
pub mod permutation;
pub mod uniqueness;

pub use activation::ActivationMatrix;
pub use clustering::{cluster, ClusteringResult, Dendrogram, DistanceMatrix};
pub use co_survival::{CoSurvivalGraph, DegreeDistribution};
pub use permutation::{permutation_test, PermutationResult};
pub use uniqueness::{collision_report, CollisionReport};

use scriptorium_core::config::GraphConfig;
use scriptorium_core::errors::AnalysisError;
use serde::Serialize;
use tracing::info;

use crate::corpus::Record;
use crate::survivor::SurvivorSet;

/// Every graph-layer result for one batch.
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub activation: ActivationMatrix,
    pub degrees: DegreeDistribution,
    pub clustering: ClusteringResult,
    pub permutation: PermutationResult,
    pub collisions: CollisionReport,
}

/// Run the full graph layer with parameters from `config`.
///
/// The cluster count is clamped to the number of activation rows.
pub fn analyze(
    records: &[Record],
    sets: &[SurvivorSet],
    config: &GraphConfig,
) -> Result<GraphReport, AnalysisError> {
    let activation = ActivationMatrix::build(records, sets, config.effective_slot());
    let k = config.effective_clusters().min(activation.n_rows());
    let clustering = cluster(&activation, k)?;
    let permutation = permutation_test(
        &activation,
        k,
        config.effective_permutations(),
        config.effective_seed(),
    )?;
    let degrees = CoSurvivalGraph::build(sets).degree_distribution();
    let collisions = collision_report(sets);

    info!(
        rows = activation.n_rows(),
        classes = activation.n_cols(),
        k,
        p_value = permutation.p_value,
        collisions = collisions.colliding_records,
        "graph analysis done"
    );

    Ok(GraphReport {
        activation,
        degrees,
        clustering,
        permutation,
        collisions,
    })
}

/// Serialize any graph-layer output as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
