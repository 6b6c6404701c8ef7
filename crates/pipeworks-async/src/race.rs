use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::select_all;

use pipeworks_types::{FuncError, Result, Value};

use crate::function::{AsyncFunction, SharedAsyncFunction};

/// Run every branch concurrently and settle with the first one to finish.
///
/// The first branch to settle decides the outcome, whether it succeeded or
/// failed. The other branches are cancelled as soon as a winner is known.
/// When several branches are ready on the same poll, the earliest declared
/// one wins. Racing zero branches is an error.
#[derive(Clone, Default)]
pub struct AsyncRace {
    branches: Vec<SharedAsyncFunction>,
}

impl AsyncRace {
    pub fn new(branches: Vec<SharedAsyncFunction>) -> Self {
        Self { branches }
    }

    /// Add a competitor after the existing ones.
    pub fn append<F: AsyncFunction + 'static>(mut self, branch: F) -> Self {
        self.branches.push(Arc::new(branch));
        self
    }

    /// Add a competitor before the existing ones.
    pub fn prepend<F: AsyncFunction + 'static>(mut self, branch: F) -> Self {
        self.branches.insert(0, Arc::new(branch));
        self
    }

    pub fn push_shared(&mut self, branch: SharedAsyncFunction) -> &mut Self {
        self.branches.push(branch);
        self
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn branch_names(&self) -> Vec<&str> {
        self.branches.iter().map(|b| b.name()).collect()
    }
}

#[async_trait]
impl AsyncFunction for AsyncRace {
    fn name(&self) -> &str {
        "async_race"
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        if self.branches.is_empty() {
            return Err(FuncError::EmptyComposition {
                combinator: "async_race".into(),
            });
        }

        let calls = self.branches.iter().map(|branch| branch.invoke(input.clone()));
        let (outcome, winner, losers) = select_all(calls).await;
        tracing::debug!(
            winner = self.branches[winner].name(),
            index = winner,
            cancelled = losers.len(),
            ok = outcome.is_ok(),
            "race settled"
        );
        drop(losers);
        outcome
    }

    fn race<F>(self, other: F) -> AsyncRace
    where
        F: AsyncFunction + 'static,
    {
        AsyncRace::append(self, other)
    }
}

impl fmt::Debug for AsyncRace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncRace")
            .field("branches", &self.branch_names())
            .finish()
    }
}
