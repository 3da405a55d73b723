//! Logging initialization and configuration.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset. Target directives match by prefix,
/// so `orrery` covers every `orrery_*` crate.
pub const DEFAULT_LOG_FILTER: &str = "info,orrery=debug";

/// Initialize the logging system with tracing.
///
/// Filtering comes from `RUST_LOG` when set, otherwise engine crates log at
/// debug level and everything else at info.
///
/// # Example
/// ```no_run
/// orrery_core::init_logging();
/// tracing::info!("Simulation initialized");
/// ```
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
