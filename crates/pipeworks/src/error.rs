use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipeworksError {
    #[error(transparent)]
    Func(#[from] pipeworks_types::FuncError),

    #[error("fan-out configuration error: {0}")]
    FanOut(#[from] pipeworks_async::ConfigError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] pipeworks_telemetry::TelemetryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type PipeworksResult<T> = Result<T, PipeworksError>;
