//! Tracing subscriber installation.
//!
//! Library crates only emit `tracing` events; applications embedding the
//! toolkit call [`init_tracing`] once at startup.

use crate::config::LogLevel;
use crate::ToolkitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: an [`EnvFilter`] honouring `RUST_LOG`,
/// falling back to `level`, and a `fmt` layer.
///
/// # Errors
///
/// [`ToolkitError::Telemetry`] if a global subscriber is already set.
pub fn init_tracing(level: LogLevel) -> Result<(), ToolkitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| ToolkitError::Telemetry(e.to_string()))
}
