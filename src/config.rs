//! Environment configuration for the command-line front end
//!
//! The detector itself never reads this; the CLI turns it into explicit
//! arguments.

use crate::feature_flags::FeatureFlags;
use std::env;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_FORMAT: &str = "human";
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const VALID_FORMATS: &[&str] = &["human", "json", "yaml"];

pub const ENV_FEATURE_FLAGS: &str = "MANIFEST_DETECT_FEATURE_FLAGS";
pub const ENV_LOG_LEVEL: &str = "MANIFEST_DETECT_LOG_LEVEL";
pub const ENV_FORMAT: &str = "MANIFEST_DETECT_FORMAT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Valid options: human, json, yaml")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorConfig {
    pub feature_flags: Vec<String>,
    pub log_level: String,
    pub format: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            feature_flags: Vec::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}

impl DetectorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let feature_flags = lookup(ENV_FEATURE_FLAGS)
            .map(|v| parse_flag_list(&v))
            .unwrap_or_default();

        let log_level = lookup(ENV_LOG_LEVEL)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let format = lookup(ENV_FORMAT)
            .unwrap_or_else(|| DEFAULT_FORMAT.to_string())
            .to_lowercase();

        Self {
            feature_flags,
            log_level,
            format,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        if !VALID_FORMATS.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidFormat(self.format.clone()));
        }
        Ok(())
    }

    /// Flags from the environment merged with flags given on the command line
    pub fn feature_flags_with(&self, extra: &[String]) -> FeatureFlags {
        self.feature_flags
            .iter()
            .chain(extra.iter())
            .cloned()
            .collect()
    }
}

fn parse_flag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
