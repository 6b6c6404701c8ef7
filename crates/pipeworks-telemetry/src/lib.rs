//! Logging setup for pipeworks.
//!
//! The combinator crates only emit `tracing` events and spans. This crate
//! turns a [`LoggingConfig`] into a `tracing-subscriber` fmt subscriber,
//! either installed globally with [`init`] or returned as a
//! [`Dispatch`](tracing::Dispatch) for scoped use.

pub mod config;
pub mod error;
pub mod subscriber;

pub use config::{LogLevel, LoggingConfig, OutputFormat};
pub use error::{TelemetryError, TelemetryResult};
pub use subscriber::{dispatch, dispatch_with_writer, init, try_init_default};
