//! Threshold configuration for process lifecycles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_STARTUP_FAILURE_THRESHOLD: u32 = 5;
pub const DEFAULT_REST_FAILURE_THRESHOLD: u32 = 3;
pub const DEFAULT_REBOOT_FAILURE_THRESHOLD: u32 = 3;

/// Errors found while loading or validating a [`LifecycleConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Lifecycle name must not be empty")]
    EmptyName,

    #[error("Threshold '{name}' must be at least 1 (got {value})")]
    InvalidThreshold { name: &'static str, value: u32 },

    #[error("Failed to parse lifecycle config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Thresholds and identity of one supervised process lifecycle.
///
/// Missing fields take their default when deserialized. An explicit
/// `null` reboot threshold disables the reboot counter.
///
/// # Example
///
/// ```rust
/// use nodewatch::lifecycle::LifecycleConfig;
///
/// let config = LifecycleConfig::from_json(r#"{"name": "opensearch", "rest_failure_threshold": 4}"#).unwrap();
/// assert_eq!(config.rest_failure_threshold, 4);
/// assert_eq!(config.startup_failure_threshold, 5);
/// assert_eq!(config.reboot_failure_threshold, Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Entity name used in logs and status reports.
    pub name: String,

    /// Failed health checks tolerated while starting.
    pub startup_failure_threshold: u32,

    /// Failed health checks tolerated once the process stopped responding.
    pub rest_failure_threshold: u32,

    /// Threshold of the restart counter; `None` disables counting restarts.
    pub reboot_failure_threshold: Option<u32>,
}

impl LifecycleConfig {
    /// The data-node process itself.
    pub fn datanode() -> Self {
        Self::named("datanode")
    }

    /// The search-engine process managed by the data node.
    pub fn opensearch() -> Self {
        Self::named("opensearch")
    }

    /// Default thresholds under a custom entity name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            startup_failure_threshold: DEFAULT_STARTUP_FAILURE_THRESHOLD,
            rest_failure_threshold: DEFAULT_REST_FAILURE_THRESHOLD,
            reboot_failure_threshold: Some(DEFAULT_REBOOT_FAILURE_THRESHOLD),
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        check_threshold("startup_failure_threshold", self.startup_failure_threshold)?;
        check_threshold("rest_failure_threshold", self.rest_failure_threshold)?;
        if let Some(value) = self.reboot_failure_threshold {
            check_threshold("reboot_failure_threshold", value)?;
        }
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::datanode()
    }
}

fn check_threshold(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidThreshold { name, value });
    }
    Ok(())
}
