//! Structured span field names used across Scriptorium.
//!
//! Using the same names everywhere keeps log queries stable.

/// Loader: rows read from the transcription, before filtering.
pub const ROWS_READ: &str = "rows_read";

/// Loader: rows skipped as malformed.
pub const ROWS_MALFORMED: &str = "rows_malformed";

/// Loader: tokens retained after track and marker filtering.
pub const TOKENS_RETAINED: &str = "tokens_retained";

/// Classifier: number of instruction classes loaded.
pub const CLASS_COUNT: &str = "class_count";

/// Survivor engine: index build time in milliseconds.
pub const INDEX_BUILD_MS: &str = "index_build_ms";

/// Survivor engine: batch computation time in milliseconds.
pub const SURVIVOR_BATCH_MS: &str = "survivor_batch_ms";

/// Graph layer: permutation test time in milliseconds.
pub const PERMUTATION_MS: &str = "permutation_ms";

/// Session cache: whether the memoized session was reused.
pub const SESSION_CACHE_HIT: &str = "session_cache_hit";
