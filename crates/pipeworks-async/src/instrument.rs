use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;

use pipeworks_types::{Result, Value};

use crate::function::{AsyncFunction, SharedAsyncFunction};
use crate::seq::AsyncSeq;

/// Run an async function inside a `tracing` span named `async_function`.
///
/// The span follows the future across suspension points. Failures are
/// logged at `error` level and propagate unchanged.
#[derive(Clone)]
pub struct AsyncInstrumented {
    inner: SharedAsyncFunction,
    stage: String,
}

impl AsyncInstrumented {
    pub fn new<F: AsyncFunction + 'static>(inner: F) -> Self {
        let stage = inner.name().to_string();
        Self {
            inner: Arc::new(inner),
            stage,
        }
    }

    pub fn named<F: AsyncFunction + 'static>(inner: F, stage: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(inner),
            stage: stage.into(),
        }
    }

    /// Build the sequence `self -> other`.
    pub fn append<F: AsyncFunction + 'static>(self, other: F) -> AsyncSeq {
        AsyncSeq::of(self).append(other)
    }

    /// Build the sequence `other -> self`.
    pub fn prepend<F: AsyncFunction + 'static>(self, other: F) -> AsyncSeq {
        AsyncSeq::of(self).prepend(other)
    }
}

#[async_trait]
impl AsyncFunction for AsyncInstrumented {
    fn name(&self) -> &str {
        &self.stage
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        let span = tracing::info_span!("async_function", stage = %self.stage);
        async move {
            match self.inner.invoke(input).await {
                Ok(value) => {
                    tracing::debug!("async function completed");
                    Ok(value)
                }
                Err(err) => {
                    tracing::error!(kind = err.kind(), error = %err, "async function failed");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AsyncAdapter;
    use pipeworks_types::{json, FuncError};

    #[tokio::test]
    async fn takes_the_inner_name_by_default() {
        let inner = AsyncAdapter::new(Ok).named("echo");
        assert_eq!(AsyncInstrumented::new(inner.clone()).name(), "echo");
        assert_eq!(AsyncInstrumented::named(inner, "fetch").name(), "fetch");
    }

    #[tokio::test]
    async fn results_pass_through() {
        let ok = AsyncInstrumented::new(AsyncAdapter::new(|x| Ok(json!([x]))));
        assert_eq!(ok.invoke(json!(1)).await.unwrap(), json!([1]));

        let failing = AsyncInstrumented::new(AsyncAdapter::new(|_| Err(FuncError::msg("down"))));
        assert_eq!(failing.invoke(json!(1)).await.unwrap_err().to_string(), "down");
    }
}
