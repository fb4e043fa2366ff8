//! Tracing subscriber setup for hosts that do not install their own.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DispatchConfig;

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Installs a global subscriber filtered by `RUST_LOG`, or `default_filter`
/// when `RUST_LOG` is unset or invalid.
///
/// Returns false when a global subscriber was already installed.
pub fn init_tracing(default_filter: &str, format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };
    result.is_ok()
}

/// Text output, defaulting to the configured `log_level`.
pub fn init_from_config(config: &DispatchConfig) -> bool {
    init_tracing(&config.log_level, LogFormat::Text)
}
