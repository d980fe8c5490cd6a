//! Tracing subscriber setup driven by [`LoggingConfig`]

use crate::config::LoggingConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the filter: `RUST_LOG` wins over the configured level
fn env_filter(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow!("invalid log filter '{}': {}", log_level, e))
}

/// Install the global tracing subscriber, writing to stderr
///
/// JSON output is line-delimited for log shipping; the text format carries
/// targets so gate transitions can be filtered with `tradegate_core::gate`.
/// Fails if a global subscriber is already installed.
pub fn init_logger(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(&config.log_level)?;

    let installed = if config.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };

    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
