#![forbid(unsafe_code)]

//! Logging configuration and subscriber bootstrap.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! binary's job. [`LoggingConfig`] describes the filter and output format,
//! and [`init`] (feature `subscriber`) installs a global `fmt` subscriber.
//!
//! Environment:
//! - `HERALD_LOG`: filter directives, e.g. `info` or `herald_core=debug`.
//! - `HERALD_LOG_FORMAT`: `pretty` (default) or `json`.

use crate::error::ConfigError;

/// Environment variable holding the filter directives.
pub const ENV_LOG: &str = "HERALD_LOG";
/// Environment variable selecting the output format.
pub const ENV_LOG_FORMAT: &str = "HERALD_LOG_FORMAT";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a format name (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" | "jsonl" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Filter and format for the global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Set the filter directives.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read configuration using a custom environment lookup.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(filter) = get_env(ENV_LOG).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }
        if let Some(format) = get_env(ENV_LOG_FORMAT) {
            config.format = LogFormat::parse(&format)?;
        }
        Ok(config)
    }
}

/// Install a global `fmt` subscriber described by `config`.
///
/// Fails with [`ConfigError::InvalidFilter`] for malformed directives and
/// [`ConfigError::SubscriberInstalled`] if a global subscriber already exists.
#[cfg(feature = "subscriber")]
pub fn init(config: &LoggingConfig) -> Result<(), ConfigError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| ConfigError::InvalidFilter(e.to_string()))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|_| ConfigError::SubscriberInstalled)
}
