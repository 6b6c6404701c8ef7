use std::sync::Arc;

use async_trait::async_trait;

use pipeworks_types::{Result, Value};

use crate::gather::AsyncGather;
use crate::race::AsyncRace;
use crate::seq::AsyncSeq;

/// An async function stage shared by reference between compositions.
pub type SharedAsyncFunction = Arc<dyn AsyncFunction>;

/// The asynchronous counterpart of [`pipeworks_core::Function`].
///
/// `invoke` returns a future; nothing runs until it is awaited. Dropping
/// the future cancels the call, and every combinator in this crate
/// propagates that cancellation to whatever it is currently awaiting.
///
/// # Composition
///
/// `gather` builds an [`AsyncGather`] and `race` an [`AsyncRace`]. The
/// same operations are available as `a & b` and `a | b`, and `a >> b`
/// runs `b` after `a`.
///
/// `append`/`prepend` are inherent methods rather than trait methods
/// because their meaning depends on the receiver: on an [`AsyncGather`]
/// or [`AsyncRace`] they add a branch, everywhere else they build an
/// [`AsyncSeq`]. Generic code that wants a sequence should go through
/// [`AsyncSeq::of`].
#[async_trait]
pub trait AsyncFunction: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Apply the function to `input`.
    async fn invoke(&self, input: Value) -> Result<Value>;

    /// Run `self` and `other` concurrently on the same input.
    fn gather<F>(self, other: F) -> AsyncGather
    where
        Self: Sized + 'static,
        F: AsyncFunction + 'static,
    {
        AsyncGather::new(vec![Arc::new(self) as SharedAsyncFunction, Arc::new(other)])
    }

    /// Run `self` and `other` concurrently and keep whichever settles first.
    fn race<F>(self, other: F) -> AsyncRace
    where
        Self: Sized + 'static,
        F: AsyncFunction + 'static,
    {
        AsyncRace::new(vec![Arc::new(self) as SharedAsyncFunction, Arc::new(other)])
    }
}

#[async_trait]
impl<F: AsyncFunction + ?Sized> AsyncFunction for Arc<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        (**self).invoke(input).await
    }
}

#[async_trait]
impl<F: AsyncFunction + ?Sized> AsyncFunction for Box<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        (**self).invoke(input).await
    }
}

/// Operator sugar: `&` gathers and `|` races.
macro_rules! impl_async_operators {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<G: AsyncFunction + 'static> std::ops::BitAnd<G> for $ty {
                type Output = AsyncGather;

                fn bitand(self, other: G) -> AsyncGather {
                    AsyncFunction::gather(self, other)
                }
            }

            impl<G: AsyncFunction + 'static> std::ops::BitOr<G> for $ty {
                type Output = AsyncRace;

                fn bitor(self, other: G) -> AsyncRace {
                    AsyncFunction::race(self, other)
                }
            }
        )*
    };
}

/// `a >> b` starts a new sequence with `a` as its first stage.
macro_rules! impl_followed_by {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<G: AsyncFunction + 'static> std::ops::Shr<G> for $ty {
                type Output = AsyncSeq;

                fn shr(self, next: G) -> AsyncSeq {
                    AsyncSeq::of(self).append(next)
                }
            }
        )*
    };
}

impl_async_operators!(
    crate::adapter::AsyncAdapter,
    crate::instrument::AsyncInstrumented,
    AsyncSeq,
    AsyncGather,
    AsyncRace,
);

impl_followed_by!(
    crate::adapter::AsyncAdapter,
    crate::instrument::AsyncInstrumented,
    AsyncGather,
    AsyncRace,
);
