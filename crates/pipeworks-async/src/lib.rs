//! Asynchronous combinators for pipeworks.
//!
//! [`AsyncFunction`] mirrors [`pipeworks_core::Function`] with an `async`
//! `invoke`. [`AsyncAdapter`] lifts synchronous closures, async closures and
//! whole synchronous pipes into it. Three compositions sit on top:
//!
//! - [`AsyncSeq`]: stages awaited one after another (`a >> b`)
//! - [`AsyncGather`]: branches run concurrently, results kept in declared
//!   order (`a & b`)
//! - [`AsyncRace`]: branches run concurrently, the first to settle wins
//!   (`a | b`)
//!
//! Cancellation is dropping the future. Every composition propagates it to
//! the work it is awaiting.
//!
//! ```rust
//! use pipeworks_async::{AsyncAdapter, AsyncFunction};
//! use pipeworks_types::{json, value};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let inc = |n: i64| AsyncAdapter::new(move |x| Ok(json!(value::as_i64(&x)? + n)));
//! let fan = inc(1) & inc(2);
//! assert_eq!(fan.invoke(json!(10)).await.unwrap(), json!([11, 12]));
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod function;
pub mod gather;
pub mod instrument;
pub mod race;
pub mod seq;

// Re-exports for convenience.
pub use adapter::{AsyncAdapter, AsyncUnaryFn};
pub use config::{FanOutConfig, GatherPolicy};
pub use error::{ConfigError, ConfigResult};
pub use function::{AsyncFunction, SharedAsyncFunction};
pub use gather::AsyncGather;
pub use instrument::AsyncInstrumented;
pub use race::AsyncRace;
pub use seq::AsyncSeq;
