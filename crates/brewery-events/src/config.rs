//! Configuration loading and typed config structures.
//!
//! The tool reads `brewery-config.yaml` from the working directory. Every
//! field has a default, so a missing file or a partial file is fine.
//!
//! ```yaml
//! events:
//!   path: events.yml
//!   allow_empty_events: false
//!   output_format: yaml
//! logging:
//!   level: info
//!   json: false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::resolver::ResolveOptions;
use crate::writer::TextFormat;

/// Environment variable overriding [`EventsConfig::path`].
pub const EVENTS_PATH_ENV: &str = "BREWERY_EVENTS_PATH";

/// Environment variable overriding [`LoggingConfig::level`].
pub const LOG_LEVEL_ENV: &str = "BREWERY_LOG_LEVEL";

/// Log levels accepted by [`LoggingConfig::level`].
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BreweryConfig {
    /// Where events live and how they are resolved and written.
    #[serde(default)]
    pub events: EventsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BreweryConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `BREWERY_EVENTS_PATH` overrides `events.path`
    /// - `BREWERY_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not to a struct.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides_with(|name| std::env::var(name).ok());
        config.normalize();
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(EVENTS_PATH_ENV) {
            self.events.path = PathBuf::from(path);
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
    }

    /// Replace invalid values with their defaults, logging each one.
    pub fn normalize(&mut self) {
        let level = self.logging.level.trim().to_ascii_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            self.logging.level = level;
        } else {
            warn!(
                value = %self.logging.level,
                default = %default_log_level(),
                "Invalid logging.level, using default"
            );
            self.logging.level = default_log_level();
        }
    }
}

/// Event file settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventsConfig {
    /// Path of the custom events file.
    #[serde(default = "default_events_path")]
    pub path: PathBuf,

    /// Accept events that resolve to zero steps.
    #[serde(default)]
    pub allow_empty_events: bool,

    /// Format used when writing canonical output.
    #[serde(default, deserialize_with = "lenient_format")]
    pub output_format: TextFormat,
}

impl EventsConfig {
    /// Resolver options derived from this config.
    pub const fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            allow_empty_events: self.allow_empty_events,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            path: default_events_path(),
            allow_empty_events: false,
            output_format: TextFormat::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_events_path() -> PathBuf {
    PathBuf::from("events.yml")
}

fn default_log_level() -> String {
    "info".to_owned()
}

/// Unknown formats are logged and replaced by the default.
fn lenient_format<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TextFormat, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_else(|e: String| {
        warn!(value = %raw, error = %e, "Invalid events.output_format, using default");
        TextFormat::default()
    }))
}
