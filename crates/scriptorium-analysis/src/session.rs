//! Process-wide memoized analysis session.
//!
//! A session owns the parsed corpus, the classifier, and the survivor
//! indices for one (transcription, table, config) triple. Sessions are cached
//! and rebuilt only when either source file's content hash changes.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use moka::sync::Cache;
use scriptorium_core::config::LegalityMode;
use scriptorium_core::errors::{ClassificationError, CorpusError, PipelineError};
use scriptorium_core::tracing::metrics;
use scriptorium_core::types::System;
use scriptorium_core::ScriptoriumConfig;
use tracing::{debug, field, info, info_span};
use xxhash_rust::xxh3::xxh3_64;

use crate::classification::{ClassTable, Classifier, RoleMap};
use crate::corpus::{Corpus, Record};
use crate::graph::{self, GraphReport};
use crate::morphology::Decomposer;
use crate::survivor::{SurvivorEngine, SurvivorSet, SurvivorStrategy, ZoneIndex};

/// Sessions kept alive at once.
const SESSION_CACHE_CAPACITY: u64 = 16;

/// One batch per system filter: `None`, A, B and AZC.
const BATCH_CACHE_CAPACITY: u64 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SessionKey {
    transcription: PathBuf,
    table: PathBuf,
    config: u64,
}

/// xxh3 content hashes of the two source files a session was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFingerprints {
    pub transcription: u64,
    pub table: u64,
}

fn sessions() -> &'static Cache<SessionKey, Arc<AnalysisSession>> {
    static SESSIONS: OnceLock<Cache<SessionKey, Arc<AnalysisSession>>> = OnceLock::new();
    SESSIONS.get_or_init(|| Cache::new(SESSION_CACHE_CAPACITY))
}

/// Drop every memoized session.
pub fn clear_session_cache() {
    sessions().invalidate_all();
}

/// Raw bytes of both sources, read once per load.
struct Sources {
    transcription: Vec<u8>,
    table: String,
    fingerprints: SourceFingerprints,
}

impl Sources {
    fn read(transcription: &Path, table: &Path) -> Result<Self, PipelineError> {
        let transcription_bytes = std::fs::read(transcription).map_err(|source| CorpusError::Io {
            path: transcription.display().to_string(),
            source,
        })?;
        let table_text =
            std::fs::read_to_string(table).map_err(|source| ClassificationError::Io {
                path: table.display().to_string(),
                source,
            })?;
        let fingerprints = SourceFingerprints {
            transcription: xxh3_64(&transcription_bytes),
            table: xxh3_64(table_text.as_bytes()),
        };
        Ok(Self {
            transcription: transcription_bytes,
            table: table_text,
            fingerprints,
        })
    }
}

/// Everything built once per corpus load. Immutable and shareable.
///
/// Grouped records and survivor sets are computed on first request per
/// system filter and reused afterwards.
#[derive(Debug)]
pub struct AnalysisSession {
    config: ScriptoriumConfig,
    decomposer: Decomposer,
    corpus: Corpus,
    classifier: Classifier,
    engine: SurvivorEngine,
    fingerprints: SourceFingerprints,
    records: Cache<Option<System>, Arc<Vec<Record>>>,
    survivors: Cache<Option<System>, Arc<Vec<SurvivorSet>>>,
}

impl AnalysisSession {
    /// Memoized load. Returns the cached session when both files are
    /// byte-identical to the ones it was built from.
    pub fn load(
        transcription: &Path,
        table: &Path,
        config: &ScriptoriumConfig,
    ) -> Result<Arc<Self>, PipelineError> {
        let span = info_span!("session_load", session_cache_hit = field::Empty);
        let _guard = span.enter();

        let sources = Sources::read(transcription, table)?;
        let key = SessionKey {
            transcription: canonical(transcription),
            table: canonical(table),
            config: config.fingerprint(),
        };

        if let Some(cached) = sessions().get(&key) {
            if cached.fingerprints == sources.fingerprints {
                span.record(metrics::SESSION_CACHE_HIT, true);
                debug!(transcription = %transcription.display(), "reusing cached session");
                return Ok(cached);
            }
            info!(
                transcription = %transcription.display(),
                "source files changed; rebuilding session"
            );
        }
        span.record(metrics::SESSION_CACHE_HIT, false);

        let session = Arc::new(Self::from_sources(sources, transcription, table, config)?);
        sessions().insert(key, Arc::clone(&session));
        Ok(session)
    }

    /// Build a fresh session, bypassing the cache.
    pub fn build(
        transcription: &Path,
        table: &Path,
        config: &ScriptoriumConfig,
    ) -> Result<Self, PipelineError> {
        let sources = Sources::read(transcription, table)?;
        Self::from_sources(sources, transcription, table, config)
    }

    fn from_sources(
        sources: Sources,
        transcription: &Path,
        table: &Path,
        config: &ScriptoriumConfig,
    ) -> Result<Self, PipelineError> {
        let start = Instant::now();
        let decomposer = Decomposer::from_config(&config.morphology)?;
        let corpus = Corpus::read_from(
            sources.transcription.as_slice(),
            &transcription.display().to_string(),
            &config.corpus,
        )?;
        let class_table = ClassTable::from_json(&sources.table, &table.display().to_string())?;
        let classifier = Classifier::from_table(class_table, &decomposer, RoleMap::default());

        let strategy = match config.survivor.effective_mode() {
            LegalityMode::Strict => SurvivorStrategy::Strict,
            LegalityMode::ZoneUnion => SurvivorStrategy::ZoneUnion(Arc::new(
                ZoneIndex::from_corpus(
                    &corpus,
                    &decomposer,
                    config.survivor.effective_zone_granularity(),
                ),
            )),
        };
        let mut engine = SurvivorEngine::new(&classifier, &decomposer, strategy);
        if let Some(threads) = config.survivor.threads {
            engine = engine.with_threads(threads)?;
        }

        info!(
            tokens = corpus.tokens().len(),
            classes = classifier.classes().count(),
            table_version = decomposer.table().version(),
            "analysis session built"
        );
        debug!(elapsed_ms = start.elapsed().as_millis() as u64, "session build done");

        Ok(Self {
            config: config.clone(),
            decomposer,
            corpus,
            classifier,
            engine,
            fingerprints: sources.fingerprints,
            records: Cache::new(BATCH_CACHE_CAPACITY),
            survivors: Cache::new(BATCH_CACHE_CAPACITY),
        })
    }

    pub fn config(&self) -> &ScriptoriumConfig {
        &self.config
    }

    pub fn decomposer(&self) -> &Decomposer {
        &self.decomposer
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn engine(&self) -> &SurvivorEngine {
        &self.engine
    }

    pub fn fingerprints(&self) -> SourceFingerprints {
        self.fingerprints
    }

    /// Records under the configured grouping, optionally for one system.
    pub fn records(&self, system: Option<System>) -> Arc<Vec<Record>> {
        self.records.get_with(system, || {
            debug!(?system, "grouping records");
            Arc::new(self.corpus.records(
                self.config.corpus.effective_grouping(),
                system,
                &self.decomposer,
            ))
        })
    }

    /// Records and their survivor sets, index-aligned.
    pub fn survivor_sets(
        &self,
        system: Option<System>,
    ) -> (Arc<Vec<Record>>, Arc<Vec<SurvivorSet>>) {
        let records = self.records(system);
        let sets = self
            .survivors
            .get_with(system, || Arc::new(self.engine.compute_batch(&records)));
        (records, sets)
    }

    /// Full graph-layer report over one system's survivor sets.
    pub fn graph_report(&self, system: Option<System>) -> Result<GraphReport, PipelineError> {
        let (records, sets) = self.survivor_sets(system);
        Ok(graph::analyze(&records, &sets, &self.config.graph)?)
    }
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
