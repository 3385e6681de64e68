//! Tests for the Scriptorium tracing setup.

use std::sync::Mutex;

use scriptorium_core::tracing::setup::{init_tracing, LOG_ENV_VAR};

/// Serializes tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_per_subsystem_filter_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "scriptorium_analysis::corpus=debug,scriptorium_analysis::graph=warn");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "this_is=garbage=not=a=filter");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}
