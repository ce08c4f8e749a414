//! TOML engine configuration.
//!
//! ```toml
//! readiness_mode = "progress"   # or "status" (default)
//! currency = "SAR"
//! ```
//!
//! Missing keys fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dependency::ReadinessMode;
use crate::error::ConfigError;
use crate::reschedule::DEFAULT_CURRENCY;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Readiness rule used when a caller does not pick one.
    #[serde(default)]
    pub readiness_mode: ReadinessMode,
    /// Currency label attached to reschedule fees.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            readiness_mode: ReadinessMode::default(),
            currency: default_currency(),
        }
    }
}

impl EngineConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serializes to TOML text.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
