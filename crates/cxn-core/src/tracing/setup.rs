//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "CXN_LOG";

/// Filter used when `CXN_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "cxn=info";

/// Initialize the tracing/logging system.
///
/// Reads `CXN_LOG` for per-module log levels, e.g.
/// `CXN_LOG=cxn_annotator::pipeline=debug,cxn_core=warn`.
/// Falls back to `cxn=info` if `CXN_LOG` is not set or is invalid.
///
/// Idempotent: calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // A host may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(filter)
            .try_init();
    });
}
