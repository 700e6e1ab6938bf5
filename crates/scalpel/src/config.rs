//! Setter configuration
//!
//! [`SetOptions`] bounds path length and selects how integer overflow is
//! handled during coercion. Options can be built in code or loaded from
//! TOML/JSON.

use serde::{Deserialize, Serialize};

/// Default maximum number of path segments
pub const DEFAULT_MAX_PATH_LEN: usize = 64;

/// How integers wider than the target leaf are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep the low bits of the value
    #[default]
    Truncate,
    /// Fail with a type mismatch
    Reject,
}

/// Options for set, rebuild and read calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetOptions {
    /// Maximum number of path segments accepted
    pub max_path_len: usize,
    /// Integer overflow handling
    pub overflow: OverflowPolicy,
}

impl SetOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With maximum path length
    #[inline]
    #[must_use]
    pub fn with_max_path_len(mut self, max: usize) -> Self {
        self.max_path_len = max;
        self
    }

    /// With overflow policy
    #[inline]
    #[must_use]
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Parse from TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            max_path_len: DEFAULT_MAX_PATH_LEN,
            overflow: OverflowPolicy::Truncate,
        }
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
