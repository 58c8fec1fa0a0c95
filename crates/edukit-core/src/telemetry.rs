//! Tracing subscriber setup

use crate::config::LogConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Subscriber installation failure
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Filter directives did not parse
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Rejected directives
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already set
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Filter from `RUST_LOG` if set, otherwise from the config
///
/// # Errors
/// `InvalidFilter` if the configured directives do not parse.
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|e| TelemetryError::InvalidFilter {
        filter: config.filter.clone(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber, writing to stderr
///
/// # Errors
/// `InvalidFilter` or `AlreadyInstalled`.
pub fn init(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| TelemetryError::AlreadyInstalled(e.to_string()))
}
