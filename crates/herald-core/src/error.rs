#![forbid(unsafe_code)]

//! Error type for configuration and logging bootstrap.
//!
//! Registry operations never fail: duplicate registration, unregistering an
//! absent id and notifying an expired listener are all no-ops. The only
//! fallible paths are reading configuration from the environment and
//! installing a tracing subscriber.

/// Errors from configuration parsing and logging setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A duplicate-policy string was not recognized.
    InvalidPolicy(String),
    /// A boolean flag had a value that is neither truthy nor falsy.
    InvalidFlag { key: String, value: String },
    /// A log format string was not recognized.
    InvalidLogFormat(String),
    /// A log filter directive could not be parsed.
    InvalidFilter(String),
    /// A global tracing subscriber was already installed.
    SubscriberInstalled,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy(p) => {
                write!(f, "invalid duplicate policy '{p}' (expected keep-first or replace)")
            }
            Self::InvalidFlag { key, value } => {
                write!(f, "invalid value '{value}' for {key} (expected a boolean)")
            }
            Self::InvalidLogFormat(v) => {
                write!(f, "invalid log format '{v}' (expected pretty or json)")
            }
            Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::SubscriberInstalled => write!(f, "a global tracing subscriber is already set"),
        }
    }
}

impl std::error::Error for ConfigError {}
