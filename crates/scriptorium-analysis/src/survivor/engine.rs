//! Survivor-set computation over prebuilt indices.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use scriptorium_core::errors::AnalysisError;
use scriptorium_core::tracing::metrics;
use scriptorium_core::types::RecordId;
use tracing::{debug, field, info, info_span};

use crate::classification::Classifier;
use crate::corpus::Record;
use crate::morphology::{Decomposer, Vocabulary};

use super::index::SurvivorIndex;
use super::types::SurvivorSet;
use super::zones::ZoneIndex;

/// How a record's legal vocabulary is derived from its own.
#[derive(Debug, Clone, Default)]
pub enum SurvivorStrategy {
    /// Legal sets are exactly the record's own prefix/middle/suffix values.
    #[default]
    Strict,
    /// MIDDLE set expanded through the zone index; prefix/suffix unchanged.
    ZoneUnion(Arc<ZoneIndex>),
}

/// Computes survivor sets. Immutable and `Sync` once built.
#[derive(Debug, Clone)]
pub struct SurvivorEngine {
    index: Arc<SurvivorIndex>,
    strategy: SurvivorStrategy,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl SurvivorEngine {
    pub fn new(classifier: &Classifier, decomposer: &Decomposer, strategy: SurvivorStrategy) -> Self {
        Self::with_index(Arc::new(SurvivorIndex::build(classifier, decomposer)), strategy)
    }

    /// Share an already built index, e.g. to run a second strategy.
    pub fn with_index(index: Arc<SurvivorIndex>, strategy: SurvivorStrategy) -> Self {
        Self {
            index,
            strategy,
            pool: None,
        }
    }

    /// Run batches on a dedicated pool of `threads` workers.
    pub fn with_threads(mut self, threads: usize) -> Result<Self, AnalysisError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("scriptorium-survivor-{i}"))
            .build()
            .map_err(|e| AnalysisError::ThreadPool(e.to_string()))?;
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    pub fn strategy(&self) -> &SurvivorStrategy {
        &self.strategy
    }

    pub fn index(&self) -> &Arc<SurvivorIndex> {
        &self.index
    }

    /// The legal vocabulary `record` induces under the engine's strategy.
    pub fn legal_vocabulary(&self, record: &Record) -> Vocabulary {
        match &self.strategy {
            SurvivorStrategy::Strict => record.vocabulary.clone(),
            SurvivorStrategy::ZoneUnion(zones) => Vocabulary {
                prefixes: record.vocabulary.prefixes.clone(),
                middles: zones.expand(&record.vocabulary.middles),
                suffixes: record.vocabulary.suffixes.clone(),
            },
        }
    }

    pub fn survivors_for_record(&self, record: &Record) -> SurvivorSet {
        self.survivors_for_vocabulary(record.id.clone(), &self.legal_vocabulary(record))
    }

    /// Survivors under an arbitrary legal vocabulary. ATOMIC-class tokens
    /// are always included.
    pub fn survivors_for_vocabulary(&self, record_id: RecordId, legal: &Vocabulary) -> SurvivorSet {
        let mut set = SurvivorSet {
            record_id,
            classes: Default::default(),
            tokens: Default::default(),
            legal_middle_count: legal.middles.len(),
        };
        let hits = self.index.matching(legal);
        for &i in hits.iter().chain(self.index.atomic()) {
            let entry = self.index.token(i);
            set.classes.insert(entry.class_id);
            set.tokens.insert(entry.token.clone());
        }
        set
    }

    /// One survivor set per record, in input order.
    pub fn compute_batch(&self, records: &[Record]) -> Vec<SurvivorSet> {
        let start = Instant::now();
        let span = info_span!(
            "survivor_batch",
            records = records.len(),
            survivor_batch_ms = field::Empty
        );
        let _guard = span.enter();

        let run = || {
            records
                .par_iter()
                .map(|r| self.survivors_for_record(r))
                .collect::<Vec<_>>()
        };
        let sets = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let elapsed = start.elapsed().as_millis() as u64;
        span.record(metrics::SURVIVOR_BATCH_MS, elapsed);
        let mean = if sets.is_empty() {
            0.0
        } else {
            sets.iter().map(|s| s.len()).sum::<usize>() as f64 / sets.len() as f64
        };
        info!(records = sets.len(), mean_survivors = mean, "survivor batch computed");
        debug!(elapsed_ms = elapsed, "survivor batch done");
        sets
    }
}
