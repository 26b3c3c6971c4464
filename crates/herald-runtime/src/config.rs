//! Configuration loading using figment.
//!
//! Configuration is layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `herald.toml` from the working directory or the user config
//!    directory (with the `toml-config` feature)
//! 3. Environment variables (`HERALD_*`, `__` as the section separator)
//!
//! The token is the one input startup insists on:
//! `HERALD_TOKEN=… herald-bot` is the minimal viable environment.
//!
//! # Environment Variable Mapping
//!
//! - `HERALD_TOKEN=xxx` → `token = "xxx"`
//! - `HERALD_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `HERALD_LOGGING__FORMAT=pretty` → `logging.format = "pretty"`

use std::collections::HashMap;
use std::path::PathBuf;

use figment::Figment;
use figment::providers::{Env, Serialized};
#[cfg(feature = "toml-config")]
use figment::providers::{Format, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration for a Herald client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Authentication token presented at login. Required at startup.
    #[serde(default)]
    pub token: Option<String>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file path, for [`LogOutput::File`].
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Per-module level overrides (`"herald_framework" = "debug"`).
    #[serde(default)]
    pub filters: HashMap<String, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
            filters: HashMap::new(),
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name, as used in filter directives.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// The corresponding `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature; falls back to `Full` without it.
    Json,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to load or the merged figure did not match the
    /// schema.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Layered configuration loader.
///
/// # Example
///
/// ```rust,ignore
/// let config = ConfigLoader::new()
///     .file("config/herald.toml")
///     .load()?;
/// ```
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
    load_env: bool,
}

impl ConfigLoader {
    /// Creates a loader searching the working directory and the user
    /// config directory, with environment overrides enabled.
    pub fn new() -> Self {
        let mut search_paths = vec![PathBuf::from(".")];
        if let Some(dir) = dirs::config_dir() {
            search_paths.push(dir.join("herald"));
        }
        Self {
            config_file: None,
            search_paths,
            load_env: true,
        }
    }

    /// Loads from a specific file instead of searching.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Adds a search path for `herald.toml`.
    pub fn search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Disables environment variable overrides.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges all sources and extracts the configuration.
    pub fn load(self) -> ConfigResult<ClientConfig> {
        let mut figment = Figment::from(Serialized::defaults(ClientConfig::default()));

        #[cfg(feature = "toml-config")]
        {
            if let Some(file) = &self.config_file {
                figment = figment.merge(Toml::file(file));
            } else {
                for dir in &self.search_paths {
                    figment = figment.merge(Toml::file(dir.join("herald.toml")));
                }
            }
        }

        if self.load_env {
            figment = figment.merge(Env::prefixed("HERALD_").split("__"));
        }

        figment
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
