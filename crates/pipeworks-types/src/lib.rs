//! Foundation types for pipeworks.
//!
//! Every other pipeworks crate depends on `pipeworks-types`. It defines the
//! value that flows through pipelines, the error taxonomy every combinator
//! reports with, and the operator registry used by assertion combinators.
//!
//! # Key Types
//!
//! - [`Value`]: The data currency (`serde_json::Value`); sequences are arrays
//! - [`FuncError`]: Error taxonomy shared by sync and async combinators
//! - [`ErrorReport`]: Serializable snapshot of an error
//! - [`UnaryOps`]: Closed set of comparison operators with alias parsing

pub mod error;
pub mod ops;
pub mod report;
pub mod value;

pub use error::{FuncError, Result};
pub use ops::{Predicate, UnaryOps};
pub use report::ErrorReport;
pub use value::{json, Map, Value};
