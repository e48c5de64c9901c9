//! Queue configuration.

use crate::error::{QueueError, Result};
use serde::{Deserialize, Serialize};

/// Default initial capacity: 4 KB.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4 * 1024;

/// Environment variable overriding [`QueueConfig::initial_capacity`].
pub const ENV_INITIAL_CAPACITY: &str = "BYTEQ_INITIAL_CAPACITY";

/// Environment variable overriding [`QueueConfig::max_capacity`].
pub const ENV_MAX_CAPACITY: &str = "BYTEQ_MAX_CAPACITY";

/// Environment variable overriding [`QueueConfig::verbose`].
pub const ENV_VERBOSE: &str = "BYTEQ_VERBOSE";

/// Configuration for a [`BytesQueue`](crate::BytesQueue).
///
/// # Example
///
/// ```
/// use byteq_core::QueueConfig;
///
/// let config = QueueConfig::new()
///     .with_initial_capacity(1024)
///     .with_max_capacity(64 * 1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Bytes allocated up front.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,

    /// Ceiling for growth in bytes. Zero means unbounded.
    #[serde(default)]
    pub max_capacity: usize,

    /// Log growth events at info level instead of debug.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            initial_capacity: default_initial_capacity(),
            max_capacity: 0,
            verbose: false,
        }
    }
}

impl QueueConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for a queue that may grow without limit.
    pub fn unbounded(initial_capacity: usize) -> Self {
        Self::default().with_initial_capacity(initial_capacity)
    }

    /// Config for a queue that never grows past `max_capacity` bytes.
    pub fn bounded(initial_capacity: usize, max_capacity: usize) -> Self {
        Self::unbounded(initial_capacity).with_max_capacity(max_capacity)
    }

    /// Set the initial capacity.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the growth ceiling (zero for unbounded).
    pub fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Enable verbose growth logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether growth is limited.
    pub fn is_bounded(&self) -> bool {
        self.max_capacity > 0
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(QueueError::InvalidConfig {
                field: "initial_capacity",
                cause: "must be greater than zero".to_string(),
            });
        }
        if self.is_bounded() && self.max_capacity < self.initial_capacity {
            return Err(QueueError::InvalidConfig {
                field: "max_capacity",
                cause: format!(
                    "{} is below the initial capacity {}",
                    self.max_capacity, self.initial_capacity
                ),
            });
        }
        Ok(())
    }

    /// Build a config from environment variables.
    ///
    /// Returns `None` when none of `BYTEQ_INITIAL_CAPACITY`,
    /// `BYTEQ_MAX_CAPACITY` or `BYTEQ_VERBOSE` is set. Values that do not
    /// parse are ignored with a warning.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from environment variables, falling back to defaults.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_default()
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let initial = lookup(ENV_INITIAL_CAPACITY);
        let max = lookup(ENV_MAX_CAPACITY);
        let verbose = lookup(ENV_VERBOSE);

        if initial.is_none() && max.is_none() && verbose.is_none() {
            return None;
        }

        let mut config = Self::default();
        if let Some(value) = initial.and_then(|v| parse_var(ENV_INITIAL_CAPACITY, &v)) {
            config.initial_capacity = value;
        }
        if let Some(value) = max.and_then(|v| parse_var(ENV_MAX_CAPACITY, &v)) {
            config.max_capacity = value;
        }
        if let Some(value) = verbose.and_then(|v| parse_flag(&v)) {
            config.verbose = value;
        }
        Some(config)
    }
}

fn default_initial_capacity() -> usize {
    DEFAULT_INITIAL_CAPACITY
}

fn parse_var(key: &str, value: &str) -> Option<usize> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, value, error = %e, "Ignoring unparsable queue setting");
            None
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            tracing::warn!(
                key = ENV_VERBOSE,
                value = other,
                "Ignoring unparsable queue setting"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn default_values() {
        let config = QueueConfig::default();
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(config.max_capacity, 0);
        assert!(!config.verbose);
        assert!(!config.is_bounded());
    }

    #[test]
    fn builder_pattern() {
        let config = QueueConfig::new()
            .with_initial_capacity(256)
            .with_max_capacity(1024)
            .with_verbose(true);

        assert_eq!(config.initial_capacity, 256);
        assert_eq!(config.max_capacity, 1024);
        assert!(config.verbose);
        assert!(config.is_bounded());
        assert_eq!(config, QueueConfig::bounded(256, 1024).with_verbose(true));
    }

    #[test]
    fn validation() {
        assert!(QueueConfig::unbounded(16).validate().is_ok());
        assert!(QueueConfig::bounded(16, 16).validate().is_ok());

        let err = QueueConfig::unbounded(0).validate().unwrap_err();
        assert!(matches!(
            err,
            QueueError::InvalidConfig {
                field: "initial_capacity",
                ..
            }
        ));

        let err = QueueConfig::bounded(64, 32).validate().unwrap_err();
        assert!(matches!(
            err,
            QueueError::InvalidConfig {
                field: "max_capacity",
                ..
            }
        ));
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: QueueConfig = serde_json::from_str(r#"{"max_capacity": 8192}"#).unwrap();
        assert_eq!(config.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(config.max_capacity, 8192);
        assert!(!config.verbose);
    }

    #[test]
    fn serialize_roundtrip() {
        let config = QueueConfig::bounded(128, 4096).with_verbose(true);
        let json = serde_json::to_string(&config).unwrap();
        let restored: QueueConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn env_absent() {
        assert!(QueueConfig::from_lookup(lookup(&[])).is_none());
    }

    #[test]
    fn env_overrides() {
        let config = QueueConfig::from_lookup(lookup(&[
            (ENV_INITIAL_CAPACITY, "512"),
            (ENV_MAX_CAPACITY, " 2048 "),
            (ENV_VERBOSE, "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.initial_capacity, 512);
        assert_eq!(config.max_capacity, 2048);
        assert!(config.verbose);
    }

    #[test]
    fn env_bad_values_are_ignored() {
        let config = QueueConfig::from_lookup(lookup(&[
            (ENV_INITIAL_CAPACITY, "lots"),
            (ENV_VERBOSE, "maybe"),
        ]))
        .unwrap();

        assert_eq!(config, QueueConfig::default());
    }
}
