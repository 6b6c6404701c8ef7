use std::sync::Arc;

use pipeworks_types::{Result, Value};

use crate::function::{Function, SharedFunction};

/// Run a function inside a `tracing` span.
///
/// The span is named `function` and carries the stage name as the `stage`
/// field. A failure is recorded as an `error` event with the error kind and
/// message before it propagates unchanged.
#[derive(Clone)]
pub struct Instrumented {
    inner: SharedFunction,
    stage: String,
}

impl Instrumented {
    /// Instrument `inner` under its own name.
    pub fn new<F: Function + 'static>(inner: F) -> Self {
        let stage = inner.name().to_string();
        Self {
            inner: Arc::new(inner),
            stage,
        }
    }

    /// Instrument `inner` under a custom stage name.
    pub fn named<F: Function + 'static>(inner: F, stage: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(inner),
            stage: stage.into(),
        }
    }
}

impl Function for Instrumented {
    fn name(&self) -> &str {
        &self.stage
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let span = tracing::info_span!("function", stage = %self.stage);
        let _entered = span.enter();

        match self.inner.invoke(input) {
            Ok(value) => {
                tracing::debug!("function completed");
                Ok(value)
            }
            Err(err) => {
                tracing::error!(kind = err.kind(), error = %err, "function failed");
                Err(err)
            }
        }
    }
}
