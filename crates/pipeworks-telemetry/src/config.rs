use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{TelemetryError, TelemetryResult};

/// Minimum severity that reaches the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[serde(alias = "debug")]
    Debug,
    #[default]
    #[serde(alias = "info")]
    Info,
    #[serde(alias = "warning", alias = "warn")]
    Warning,
    #[serde(alias = "error")]
    Error,
    /// `tracing` has no level above `ERROR`; critical logs at `ERROR`.
    #[serde(alias = "critical")]
    Critical,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }

    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warning => tracing::Level::WARN,
            LogLevel::Error | LogLevel::Critical => tracing::Level::ERROR,
        }
    }
}

/// How log lines are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Multi-line, human readable.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
    /// Single-line, human readable.
    Compact,
}

/// Logging configuration.
///
/// ```toml
/// level = "DEBUG"
/// format = "json"
/// filter = "pipeworks_core=trace,info"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: OutputFormat,
    /// Include the event target (module path) in each line.
    pub include_target: bool,
    /// Use ANSI colours. Ignored by the JSON format.
    pub ansi: bool,
    /// An `EnvFilter` directive string. When set it replaces `level`.
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: OutputFormat::Pretty,
            include_target: true,
            ansi: true,
            filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_toml_str(source: &str) -> TelemetryResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> TelemetryResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, directive: impl Into<String>) -> Self {
        self.filter = Some(directive.into());
        self
    }

    /// Build the event filter: the explicit directive if any, else `level`.
    pub fn env_filter(&self) -> TelemetryResult<EnvFilter> {
        match &self.filter {
            Some(directive) => {
                EnvFilter::try_new(directive).map_err(|err| TelemetryError::InvalidFilter {
                    directive: directive.clone(),
                    message: err.to_string(),
                })
            }
            None => Ok(EnvFilter::new(self.level.directive())),
        }
    }
}
