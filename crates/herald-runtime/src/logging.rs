//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The console notification classes of a typical bot logger (info, warning,
//! critical, plus client/system/database scopes) map onto tracing levels
//! and module targets here: severity is the level, the emitting module is
//! the target, and errors carry their source chains as structured fields.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging);
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig};

/// Initialize logging from a [`LoggingConfig`].
///
/// Safe to call more than once; only the first initialization wins.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// A builder for configuring logging.
///
/// # Example
///
/// ```rust,ignore
/// use herald_runtime::LoggingBuilder;
///
/// LoggingBuilder::new()
///     .with_level(tracing::Level::DEBUG)
///     .directive("herald_framework=trace")
///     .init();
/// ```
#[derive(Default)]
pub struct LoggingBuilder {
    directives: Vec<String>,
    level: Option<tracing::Level>,
    format: LogFormat,
    output: LogOutput,
    file_path: Option<PathBuf>,
}

impl LoggingBuilder {
    /// Creates a new logging builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut builder = Self::new();
        builder.level = Some(config.level.to_tracing_level());
        builder.format = config.format;
        builder.output = config.output;
        builder.file_path.clone_from(&config.file_path);
        for (module, level) in &config.filters {
            builder.directives.push(format!("{}={}", module, level));
        }
        builder
    }

    /// Sets the global log level.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a filter directive, e.g. `"herald_framework=debug"`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the output destination.
    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets the file path used with [`LogOutput::File`].
    pub fn file_path(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }

    fn build_filter(&self) -> EnvFilter {
        let base_level = self.level.unwrap_or(tracing::Level::INFO);
        let base_filter = base_level.to_string().to_lowercase();

        // RUST_LOG takes precedence over the configured base level.
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base_filter));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    /// Initialize the logging system.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Try to initialize the logging system, returning an error on failure.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();

        macro_rules! init_with_writer {
            ($writer:expr) => {
                match &self.format {
                    #[cfg(feature = "json-log")]
                    LogFormat::Json => {
                        let layer = fmt::layer().json().with_writer($writer);
                        tracing_subscriber::registry()
                            .with(layer)
                            .with(filter)
                            .try_init()
                    }
                    #[cfg(not(feature = "json-log"))]
                    LogFormat::Json => {
                        eprintln!(
                            "json log format requested without the json-log feature, using full"
                        );
                        let layer = fmt::layer().with_writer($writer);
                        tracing_subscriber::registry()
                            .with(layer)
                            .with(filter)
                            .try_init()
                    }
                    LogFormat::Compact => {
                        let layer = fmt::layer().compact().with_writer($writer);
                        tracing_subscriber::registry()
                            .with(layer)
                            .with(filter)
                            .try_init()
                    }
                    LogFormat::Full => {
                        let layer = fmt::layer().with_writer($writer);
                        tracing_subscriber::registry()
                            .with(layer)
                            .with(filter)
                            .try_init()
                    }
                    LogFormat::Pretty => {
                        let layer = fmt::layer().pretty().with_writer($writer);
                        tracing_subscriber::registry()
                            .with(layer)
                            .with(filter)
                            .try_init()
                    }
                }
            };
        }

        match &self.output {
            LogOutput::Stdout => init_with_writer!(std::io::stdout),
            LogOutput::Stderr => init_with_writer!(std::io::stderr),
            LogOutput::File => {
                if let Some(path) = &self.file_path {
                    let file_appender = tracing_appender::rolling::never(
                        path.parent().unwrap_or_else(|| Path::new(".")),
                        path.file_name().unwrap_or_else(|| OsStr::new("herald.log")),
                    );
                    init_with_writer!(file_appender)
                } else {
                    eprintln!("file output requested without a file path, using stdout");
                    init_with_writer!(std::io::stdout)
                }
            }
        }
    }
}
