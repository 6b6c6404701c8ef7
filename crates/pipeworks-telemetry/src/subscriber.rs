use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::{LoggingConfig, OutputFormat};
use crate::error::{TelemetryError, TelemetryResult};

/// Build a subscriber for `config` that writes to stdout.
pub fn dispatch(config: &LoggingConfig) -> TelemetryResult<Dispatch> {
    dispatch_with_writer(config, std::io::stdout)
}

/// Build a subscriber for `config` that writes through `writer`.
///
/// The result can be installed globally with [`init`] or scoped with
/// `tracing::dispatcher::with_default`.
pub fn dispatch_with_writer<W>(config: &LoggingConfig, writer: W) -> TelemetryResult<Dispatch>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(writer)
        .with_target(config.include_target)
        .with_ansi(config.ansi);

    Ok(match config.format {
        OutputFormat::Pretty => Dispatch::new(builder.pretty().finish()),
        OutputFormat::Json => Dispatch::new(builder.json().finish()),
        OutputFormat::Compact => Dispatch::new(builder.compact().finish()),
    })
}

/// Install the subscriber described by `config` as the global default.
///
/// Fails with [`TelemetryError::AlreadyInitialized`] if a global subscriber
/// has been installed before, by this crate or anyone else.
pub fn init(config: &LoggingConfig) -> TelemetryResult<()> {
    let dispatch = dispatch(config)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|_| TelemetryError::AlreadyInitialized)?;
    tracing::debug!(level = ?config.level, format = ?config.format, "logging initialized");
    Ok(())
}

/// Install the default configuration unless a subscriber is already set.
///
/// Returns `true` when this call installed it.
pub fn try_init_default() -> bool {
    init(&LoggingConfig::default()).is_ok()
}
