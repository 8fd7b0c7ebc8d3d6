//! Logging setup utilities.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for the given crates.
///
/// Crate names are normalised the way `tracing` sees them (`-` becomes `_`).
pub fn default_filter(crate_names: &[&str], default_log_level: &str) -> String {
    crate_names
        .iter()
        .map(|name| format!("{}={}", name.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The level applies to every crate in `crate_names`. It can be overridden
/// with the `RUST_LOG` environment variable.
///
/// # Examples
///
/// ```no_run
/// use tandem_shared::logger::setup_logger;
///
/// setup_logger(&["tandem-server", "tower_http"], "debug");
/// ```
pub fn setup_logger(crate_names: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_names, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
