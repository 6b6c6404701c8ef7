use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;

use pipeworks_core::{Function, UnaryFn};
use pipeworks_types::{FuncError, Result, Value};

use crate::function::AsyncFunction;
use crate::seq::AsyncSeq;

/// An async unary transform.
pub type AsyncUnaryFn = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

#[derive(Clone)]
enum Mode {
    /// Run the synchronous function on the awaiting task.
    Inline(UnaryFn),
    /// Await the future the function returns.
    Suspending(AsyncUnaryFn),
    /// Run the synchronous function on tokio's blocking pool.
    Blocking(UnaryFn),
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Inline(_) => "Inline",
            Mode::Suspending(_) => "Suspending",
            Mode::Blocking(_) => "Blocking",
        })
    }
}

/// Present a plain or async callable as an [`AsyncFunction`].
///
/// * [`AsyncAdapter::new`] wraps a synchronous closure. It runs when the
///   returned future is first polled and completes without suspending.
/// * [`AsyncAdapter::from_async`] wraps a closure returning a future, which
///   is awaited.
/// * [`AsyncAdapter::blocking`] moves the synchronous closure onto
///   `tokio::task::spawn_blocking`. Dropping the awaiting future detaches the
///   blocking call; it runs to completion but its result is discarded.
/// * [`AsyncAdapter::from_function`] lifts any synchronous
///   [`Function`](pipeworks_core::Function), including whole pipes.
#[derive(Clone, Debug)]
pub struct AsyncAdapter {
    mode: Mode,
    name: String,
}

impl AsyncAdapter {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            mode: Mode::Inline(Arc::new(func)),
            name: "async_fn".into(),
        }
    }

    pub fn from_async<F, Fut>(func: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            mode: Mode::Suspending(Arc::new(move |input| func(input).boxed())),
            name: "async_fn".into(),
        }
    }

    pub fn blocking<F>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            mode: Mode::Blocking(Arc::new(func)),
            name: "blocking_fn".into(),
        }
    }

    /// Lift a synchronous function; the adapter takes over its name.
    pub fn from_function<F: Function + 'static>(func: F) -> Self {
        let name = func.name().to_string();
        Self {
            mode: Mode::Inline(Arc::new(move |input| func.invoke(input))),
            name,
        }
    }

    /// Replace the name reported in logs.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self.mode, Mode::Blocking(_))
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
impl AsyncFunction for AsyncAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        match &self.mode {
            Mode::Inline(func) => func(input),
            Mode::Suspending(func) => func(input).await,
            Mode::Blocking(func) => {
                let func = Arc::clone(func);
                tokio::task::spawn_blocking(move || func(input))
                    .await
                    .map_err(|err| FuncError::Task(err.to_string()))?
            }
        }
    }
}
