#![forbid(unsafe_code)]

//! Registry configuration.
//!
//! Two knobs exist:
//!
//! - [`DuplicatePolicy`]: what `register` does when the id is already taken.
//!   The default keeps the first registrant and ignores the newcomer.
//! - `prune_expired_on_notify`: whether a notification pass drops entries
//!   whose listener has been destroyed. Off by default, so expired entries
//!   stay until explicitly unregistered.
//!
//! Both can be read from the environment (`HERALD_DUPLICATE_POLICY`,
//! `HERALD_PRUNE_EXPIRED`); unset variables keep the defaults.

use crate::error::ConfigError;

/// Environment variable selecting the [`DuplicatePolicy`].
pub const ENV_DUPLICATE_POLICY: &str = "HERALD_DUPLICATE_POLICY";
/// Environment variable toggling pruning of expired entries during notify.
pub const ENV_PRUNE_EXPIRED: &str = "HERALD_PRUNE_EXPIRED";

/// Behavior when registering an id that is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// First registrant wins; later registrations under the same id are ignored.
    #[default]
    KeepFirst,
    /// The new listener takes over the existing entry, keeping its position.
    Replace,
}

impl DuplicatePolicy {
    /// Parse a policy name (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keep-first" | "keep_first" | "first" | "skip" => Ok(Self::KeepFirst),
            "replace" | "overwrite" => Ok(Self::Replace),
            _ => Err(ConfigError::InvalidPolicy(value.to_string())),
        }
    }
}

/// Configuration for a [`Subject`](crate::Subject)'s listener registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// What to do with duplicate registration ids.
    pub duplicate_policy: DuplicatePolicy,
    /// Drop expired entries at the start of every notification pass.
    pub prune_expired_on_notify: bool,
}

impl RegistryConfig {
    /// Default configuration: keep first registrant, never auto-prune.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duplicate-id policy.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set whether expired entries are pruned during notification.
    #[must_use]
    pub fn with_prune_expired_on_notify(mut self, prune: bool) -> Self {
        self.prune_expired_on_notify = prune;
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
        if let Some(value) = get_env(ENV_DUPLICATE_POLICY) {
            config.duplicate_policy = DuplicatePolicy::parse(&value)?;
        }
        if let Some(value) = get_env(ENV_PRUNE_EXPIRED) {
            config.prune_expired_on_notify = parse_flag(ENV_PRUNE_EXPIRED, &value)?;
        }
        Ok(config)
    }
}

/// Parse a boolean environment flag.
pub(crate) fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
