//! Structured logging setup
//!
//! Logs go to stderr through `tracing-subscriber`. `RUST_LOG` overrides the
//! configured level when set.
//!
//! # Example
//!
//! ```no_run
//! use manifest_detect::util::logging;
//!
//! logging::init_logging(logging::LoggingConfig::from_env());
//! tracing::debug!(file = "package.json", "Detecting");
//! ```

use crate::config::ENV_LOG_LEVEL;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const ENV_LOG_JSON: &str = "MANIFEST_DETECT_LOG_JSON";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Emit one JSON object per event
    pub use_json: bool,

    /// Include the module target in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Reads `MANIFEST_DETECT_LOG_LEVEL` and `MANIFEST_DETECT_LOG_JSON`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let level = lookup(ENV_LOG_LEVEL)
            .and_then(|v| parse_level(&v))
            .unwrap_or(defaults.level);

        let use_json = lookup(ENV_LOG_JSON)
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(defaults.use_json);

        Self {
            level,
            use_json,
            ..defaults
        }
    }
}

/// Parses a log level, case-insensitively. Unknown values map to `None`.
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = if env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(format!("manifest_detect={}", config.level))
        };

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        let result = if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging already initialized: {}", e);
        }
    });
}
