use std::sync::Arc;

use pipeworks_types::{FuncError, Result, Value};

use crate::function::{ErrorHandler, Function, SharedFunction};

/// Run a function and optionally turn its failure into a value.
///
/// Every error raised by the wrapped function is intercepted. With a
/// handler, the handler's result replaces the failure; without one, the
/// error propagates unchanged.
#[derive(Clone)]
pub struct Attempt {
    func: SharedFunction,
    handler: Option<ErrorHandler>,
}

impl Attempt {
    /// Wrap `func` without a handler (failures propagate).
    pub fn new<F: Function + 'static>(func: F) -> Self {
        Self {
            func: Arc::new(func),
            handler: None,
        }
    }

    /// Wrap `func` and recover failures with `handler`.
    pub fn with_handler<F, H>(func: F, handler: H) -> Self
    where
        F: Function + 'static,
        H: Fn(FuncError) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(func).handle(handler)
    }

    /// Replace the handler.
    pub fn handle<H>(mut self, handler: H) -> Self
    where
        H: Fn(FuncError) -> Result<Value> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Recover every failure of `func` as `Value::Null`.
    pub fn as_optional<F: Function + 'static>(func: F) -> Self {
        Self::with_handler(func, |_| Ok(Value::Null))
    }

    /// Recover every failure of `func` as its JSON error report.
    pub fn as_report<F: Function + 'static>(func: F) -> Self {
        Self::with_handler(func, |err| Ok(err.report().to_value()))
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

impl Function for Attempt {
    fn name(&self) -> &str {
        "attempt"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        match (self.func.invoke(input), &self.handler) {
            (Ok(value), _) => Ok(value),
            (Err(err), Some(handler)) => {
                tracing::debug!(
                    function = self.func.name(),
                    kind = err.kind(),
                    error = %err,
                    "recovering failed function"
                );
                handler(err)
            }
            (Err(err), None) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{Head, Map};
    use pipeworks_types::{json, value};

    #[derive(Debug, thiserror::Error)]
    #[error("division by zero")]
    struct DivByZero;

    fn reciprocal() -> Map {
        Map::new(|x| match value::as_f64(&x)? {
            d if d == 0.0 => Err(FuncError::user(DivByZero)),
            d => Ok(json!(1.0 / d)),
        })
    }

    #[test]
    fn as_optional_recovers_to_absent() {
        let safe = Attempt::as_optional(reciprocal());
        assert_eq!(safe.invoke(json!(0)).unwrap(), Value::Null);
        assert_eq!(safe.invoke(json!(4)).unwrap(), json!(0.25));
    }

    #[test]
    fn without_handler_the_error_is_unchanged() {
        let bare = Attempt::new(reciprocal());
        assert!(!bare.has_handler());
        let err = bare.invoke(json!(0)).unwrap_err();
        assert!(err.user_error::<DivByZero>().is_some());
    }

    #[test]
    fn handler_receives_the_original_error() {
        let fallback = Attempt::with_handler(Head, |err| match err {
            FuncError::EmptyInput { .. } => Ok(json!("nothing")),
            other => Err(other),
        });
        assert_eq!(fallback.invoke(json!([])).unwrap(), json!("nothing"));
        assert_eq!(fallback.invoke(json!([7])).unwrap(), json!(7));
        assert_eq!(fallback.invoke(json!(1)).unwrap_err().kind(), "TypeMismatch");
    }

    #[test]
    fn as_report_returns_the_error_as_a_value() {
        let report = Attempt::as_report(reciprocal()).invoke(json!(0)).unwrap();
        assert_eq!(report["kind"], json!("User"));
        assert_eq!(report["message"], json!("division by zero"));
    }
}
