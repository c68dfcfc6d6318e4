//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays machine-readable JSON. Filtering is
//! controlled by `OMNILINK_LOG` (standard `EnvFilter` syntax, default
//! `info`).

use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter.
pub const LOG_ENV_VAR: &str = "OMNILINK_LOG";

/// Install the global stderr subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
