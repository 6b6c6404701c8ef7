use std::error::Error as StdError;

use serde::{Deserialize, Serialize};

use crate::error::FuncError;
use crate::value::{json, Value};

/// A serializable snapshot of a [`FuncError`].
///
/// Captures the variant name, the display message, the messages of every
/// underlying cause, and the structured fields of the variant. Reports let a
/// pipeline turn a failure into an ordinary value (see `Attempt::as_report`
/// in `pipeworks-core`) or ship it to a log sink as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Variant name, e.g. `EmptyInput` or `User`.
    pub kind: String,
    /// Display message of the error.
    pub message: String,
    /// Messages of the source chain, outermost first.
    pub causes: Vec<String>,
    /// Structured fields of the variant (`null` when there are none).
    pub details: Value,
}

impl ErrorReport {
    /// Build a report from an error.
    pub fn from_error(err: &FuncError) -> Self {
        let mut causes = Vec::new();
        let mut source = StdError::source(err);
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
            causes,
            details: details_of(err),
        }
    }

    /// The report as a JSON value.
    pub fn to_value(&self) -> Value {
        // Every field serializes to JSON without error.
        serde_json::to_value(self).unwrap_or_default()
    }

    /// The report as a compact JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn details_of(err: &FuncError) -> Value {
    match err {
        FuncError::EmptyInput { combinator } | FuncError::EmptyComposition { combinator } => {
            json!({ "combinator": combinator })
        }
        FuncError::InvalidOperator(token) => json!({ "token": token }),
        FuncError::QuantityAssertionFailed {
            actual,
            op,
            expected,
        } => json!({
            "actual": actual,
            "op": op.canonical_name(),
            "expected": expected,
        }),
        FuncError::TypeMismatch { expected, found } => {
            json!({ "expected": expected, "found": found })
        }
        FuncError::Incomparable { op, left, right } => json!({
            "op": op.canonical_name(),
            "left": left,
            "right": right,
        }),
        FuncError::Construct { target, .. } => json!({ "target": target }),
        FuncError::Task(_) | FuncError::User(_) => Value::Null,
    }
}

impl FuncError {
    /// Snapshot this error as a serializable [`ErrorReport`].
    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error(self)
    }
}

impl From<&FuncError> for ErrorReport {
    fn from(err: &FuncError) -> Self {
        Self::from_error(err)
    }
}
