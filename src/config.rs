//! Runtime options for the operation layer
//!
//! Options can be built in code, parsed from JSON/YAML/TOML, or read from the
//! environment, and are installed process-wide with [`set_options`].

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::error::{Error, Result};

/// Environment variable selecting the chained-assignment mode
pub const ENV_CHAINED_ASSIGNMENT: &str = "PANDRS_OPS_CHAINED_ASSIGNMENT";
/// Environment variable enabling surface logging
pub const ENV_LOG_SURFACE: &str = "PANDRS_OPS_LOG_SURFACE";

/// What to do when a container derived from another one is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChainedAssignment {
    /// Log a warning and carry on
    #[default]
    Warn,
    /// Refuse the write with `Error::SettingWithCopy`
    Raise,
    /// No check
    Off,
}

impl std::str::FromStr for ChainedAssignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(ChainedAssignment::Warn),
            "raise" => Ok(ChainedAssignment::Raise),
            "off" | "none" => Ok(ChainedAssignment::Off),
            other => Err(Error::Config(format!(
                "unknown chained_assignment mode: {}",
                other
            ))),
        }
    }
}

/// Configuration for the operation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsConfig {
    /// Setting-with-copy policy for ordinary mutators
    pub chained_assignment: ChainedAssignment,
    /// Log every attached name when an operation surface is installed
    pub log_surface: bool,
}

impl Default for OpsConfig {
    fn default() -> Self {
        OpsConfig {
            chained_assignment: ChainedAssignment::Warn,
            log_surface: false,
        }
    }
}

impl OpsConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Defaults overridden by `PANDRS_OPS_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = OpsConfig::default();
        if let Ok(mode) = std::env::var(ENV_CHAINED_ASSIGNMENT) {
            config.chained_assignment = mode.parse()?;
        }
        if let Ok(flag) = std::env::var(ENV_LOG_SURFACE) {
            config.log_surface = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for OpsConfig
#[derive(Debug, Default)]
pub struct OpsConfigBuilder {
    config: OpsConfig,
}

impl OpsConfigBuilder {
    /// Creates a new builder
    pub fn new() -> Self {
        OpsConfigBuilder {
            config: OpsConfig::default(),
        }
    }

    /// Sets the chained-assignment mode
    pub fn chained_assignment(mut self, mode: ChainedAssignment) -> Self {
        self.config.chained_assignment = mode;
        self
    }

    /// Sets whether surface installation logs every name
    pub fn log_surface(mut self, enabled: bool) -> Self {
        self.config.log_surface = enabled;
        self
    }

    pub fn build(self) -> OpsConfig {
        self.config
    }
}

lazy_static::lazy_static! {
    /// Process-wide options
    static ref OPTIONS: RwLock<OpsConfig> = RwLock::new(OpsConfig::default());
}

/// Current process-wide options
pub fn get_options() -> OpsConfig {
    OPTIONS.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Replace the process-wide options, returning the previous ones
pub fn set_options(config: OpsConfig) -> OpsConfig {
    let mut guard = OPTIONS.write().unwrap_or_else(|e| e.into_inner());
    std::mem::replace(&mut *guard, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let json = OpsConfig::from_json_str(r#"{"chained_assignment": "raise"}"#).unwrap();
        assert_eq!(json.chained_assignment, ChainedAssignment::Raise);
        assert!(!json.log_surface);

        let yaml = OpsConfig::from_yaml_str("chained_assignment: \"off\"\nlog_surface: true\n").unwrap();
        assert_eq!(yaml.chained_assignment, ChainedAssignment::Off);
        assert!(yaml.log_surface);

        let toml = OpsConfig::from_toml_str("chained_assignment = \"warn\"").unwrap();
        assert_eq!(toml, OpsConfig::default());
    }

    #[test]
    fn test_invalid_mode() {
        assert!("sometimes".parse::<ChainedAssignment>().is_err());
        assert!(OpsConfig::from_json_str(r#"{"chained_assignment": "sometimes"}"#).is_err());
    }

    #[test]
    fn test_builder() {
        let config = OpsConfigBuilder::new()
            .chained_assignment(ChainedAssignment::Raise)
            .log_surface(true)
            .build();
        assert_eq!(config.chained_assignment, ChainedAssignment::Raise);
        assert!(config.log_surface);
    }
}
