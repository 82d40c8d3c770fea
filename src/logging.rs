//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install a global subscriber for `config`
///
/// `RUST_LOG` takes precedence over the configured level. Installing twice
/// returns an error instead of panicking.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new(format!(
                "polo_analytics={},warn",
                config.level
            ))
        })
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    }
    .context("Failed to install tracing subscriber")?;

    crate::i18n::set_locale(&config.locale);
    tracing::debug!(level = %config.level, format = %config.format, "Tracing initialized");

    Ok(())
}
