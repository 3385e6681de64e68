//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "SCRIPTORIUM_LOG";

/// Initialize the Scriptorium tracing/logging system.
///
/// Reads `SCRIPTORIUM_LOG` for per-subsystem log levels, e.g.
/// `SCRIPTORIUM_LOG=scriptorium_analysis::corpus=debug,scriptorium_analysis::graph=warn`.
///
/// Falls back to `scriptorium=info` if the variable is unset or invalid.
/// Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("scriptorium=info"));

        // A host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
