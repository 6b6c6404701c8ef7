use std::path::Path;

use serde::{Deserialize, Serialize};

use pipeworks_async::FanOutConfig;
use pipeworks_telemetry::LoggingConfig;

use crate::error::PipeworksResult;

/// Application-level settings, one TOML table per concern.
///
/// ```toml
/// [logging]
/// level = "DEBUG"
/// format = "json"
///
/// [fan_out]
/// gather_policy = "fail_fast"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub fan_out: FanOutConfig,
}

impl Settings {
    pub fn from_toml_str(source: &str) -> PipeworksResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> PipeworksResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Install the global subscriber described by the `[logging]` table.
    pub fn init_logging(&self) -> PipeworksResult<()> {
        pipeworks_telemetry::init(&self.logging)?;
        Ok(())
    }
}
