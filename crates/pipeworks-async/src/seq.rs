use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use pipeworks_types::{Result, Value};

use crate::function::{AsyncFunction, SharedAsyncFunction};

/// Sequential async composition: each stage awaits the previous one.
///
/// Fail-fast like [`pipeworks_core::Pipe`]: the first failing stage ends the
/// run and later stages are never started. Dropping the returned future
/// cancels the stage in flight and skips the rest. An empty sequence is the
/// identity.
#[derive(Clone, Default)]
pub struct AsyncSeq {
    stages: Vec<SharedAsyncFunction>,
}

impl AsyncSeq {
    pub fn new(stages: Vec<SharedAsyncFunction>) -> Self {
        Self { stages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// A one-stage sequence. Any async function can be extended from here,
    /// including gathers and races.
    pub fn of<F: AsyncFunction + 'static>(stage: F) -> Self {
        Self::new(vec![Arc::new(stage)])
    }

    /// Run `stage` after the existing stages.
    pub fn append<F: AsyncFunction + 'static>(mut self, stage: F) -> Self {
        self.push(stage);
        self
    }

    /// Run `stage` before the existing stages.
    pub fn prepend<F: AsyncFunction + 'static>(mut self, stage: F) -> Self {
        self.push_front(stage);
        self
    }

    /// Append a stage to the end.
    pub fn push<F: AsyncFunction + 'static>(&mut self, stage: F) -> &mut Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Insert a stage at the front.
    pub fn push_front<F: AsyncFunction + 'static>(&mut self, stage: F) -> &mut Self {
        self.stages.insert(0, Arc::new(stage));
        self
    }

    pub fn push_shared(&mut self, stage: SharedAsyncFunction) -> &mut Self {
        self.stages.push(stage);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

#[async_trait]
impl AsyncFunction for AsyncSeq {
    fn name(&self) -> &str {
        "async_seq"
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        let mut value = input;
        for (index, stage) in self.stages.iter().enumerate() {
            tracing::trace!(stage = stage.name(), index, "running async stage");
            value = stage.invoke(value).await.inspect_err(|err| {
                tracing::debug!(stage = stage.name(), index, error = %err, "async sequence aborted");
            })?;
        }
        Ok(value)
    }
}

impl<G: AsyncFunction + 'static> std::ops::Shr<G> for AsyncSeq {
    type Output = AsyncSeq;

    fn shr(self, next: G) -> AsyncSeq {
        self.append(next)
    }
}

impl FromIterator<SharedAsyncFunction> for AsyncSeq {
    fn from_iter<I: IntoIterator<Item = SharedAsyncFunction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for AsyncSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncSeq")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AsyncAdapter;
    use pipeworks_types::{json, value, FuncError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn add(n: i64) -> AsyncAdapter {
        AsyncAdapter::new(move |x| Ok(json!(value::as_i64(&x)? + n)))
    }

    fn counting(hits: &Arc<AtomicUsize>) -> AsyncAdapter {
        let hits = hits.clone();
        AsyncAdapter::new(move |x| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(x)
        })
    }

    #[tokio::test]
    async fn stages_run_in_order() {
        let seq = AsyncSeq::empty()
            .append(add(1))
            .append(AsyncAdapter::new(|x| Ok(json!(value::as_i64(&x)? * 10))))
            .prepend(add(2));
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.invoke(json!(0)).await.unwrap(), json!(30));
    }

    #[tokio::test]
    async fn empty_sequence_is_identity() {
        let input = json!({"a": [1, 2]});
        assert_eq!(AsyncSeq::empty().invoke(input.clone()).await.unwrap(), input);
    }

    #[tokio::test]
    async fn first_failure_skips_later_stages() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seq = AsyncSeq::empty()
            .append(counting(&hits))
            .append(AsyncAdapter::new(|_| Err(FuncError::msg("stage two failed"))))
            .append(counting(&hits));

        let err = seq.invoke(json!(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "stage two failed");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancellation_stops_the_sequence() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seq = AsyncSeq::empty()
            .append(counting(&hits))
            .append(AsyncAdapter::from_async(|x| async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok::<_, FuncError>(x)
            }))
            .append(counting(&hits));

        let outcome = tokio::time::timeout(Duration::from_millis(20), seq.invoke(json!(1))).await;
        assert!(outcome.is_err());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn shr_extends_an_existing_sequence() {
        let seq = AsyncSeq::of(add(1)) >> add(2) >> add(3);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.invoke(json!(0)).await.unwrap(), json!(6));
    }

    #[tokio::test]
    async fn push_mutates_in_place() {
        let mut seq = AsyncSeq::empty();
        seq.push(add(1)).push_front(add(100));
        assert_eq!(seq.stage_names(), vec!["async_fn", "async_fn"]);
        assert_eq!(seq.invoke(json!(0)).await.unwrap(), json!(101));
        assert_eq!(format!("{seq:?}"), r#"AsyncSeq { stages: ["async_fn", "async_fn"] }"#);
    }
}
