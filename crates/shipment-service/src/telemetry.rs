//! Tracing subscriber setup shared by the binaries.

use shipment_core::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,shipment_core=debug,shipment_service=debug";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `log.filter`, which wins over the built-in default.
/// JSON output omits timestamps because the Lambda log pipeline adds its own.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.filter.as_deref().unwrap_or(DEFAULT_FILTER))
    });

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).without_time())
            .try_init(),
        _ => registry.with(fmt::layer().with_target(true)).try_init(),
    }
}
