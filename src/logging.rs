//! Structured logging for the command-line tools.
//!
//! Events go to stderr so the generated documents and the run summary on
//! stdout stay clean. `BENCHGEN_LOG` takes precedence over the level passed
//! in, using the usual `EnvFilter` directive syntax.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive, e.g. `plant_benchgen=debug`.
pub const LOG_ENV: &str = "BENCHGEN_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter '{0}'")]
    InvalidFilter(String),
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Build the filter from `BENCHGEN_LOG`, falling back to `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => {
            EnvFilter::try_new(&directive).map_err(|_| LoggingError::InvalidFilter(directive))
        }
        _ => EnvFilter::try_new(level).map_err(|_| LoggingError::InvalidFilter(level.to_string())),
    }
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), LoggingError> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_valid_filters() {
        for level in ["error", "warn", "info", "debug", "trace", "off"] {
            assert!(EnvFilter::try_new(level).is_ok(), "{}", level);
        }
    }

    #[test]
    fn default_format_is_text() {
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }
}
