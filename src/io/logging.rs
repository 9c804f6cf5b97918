//! Tracing subscriber setup for the command-line binary
//!
//! Diagnostics only: search results and scores are printed by the CLI and
//! never depend on the log filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::io::configuration::DEFAULT_LOG_FILTER;

/// Install a compact stderr subscriber filtered by `RUST_LOG`
///
/// Falls back to the default filter when `RUST_LOG` is unset or invalid.
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()
        .is_ok()
}
