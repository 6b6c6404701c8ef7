use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{join_all, try_join_all};

use pipeworks_types::{Result, Value};

use crate::config::{FanOutConfig, GatherPolicy};
use crate::function::{AsyncFunction, SharedAsyncFunction};

/// Run every branch concurrently on the same input and collect the results.
///
/// The output is an array whose element `i` is the result of branch `i`,
/// regardless of completion order. How failures are handled depends on the
/// [`GatherPolicy`]:
///
/// * `WaitAll` (default): every branch runs to completion, then the error
///   of the first failing branch *in declared order* is returned.
/// * `FailFast`: the first branch to fail ends the gather and the
///   remaining branches are cancelled.
///
/// Dropping the returned future cancels every branch still running. A
/// gather with no branches returns an empty array.
#[derive(Clone, Default)]
pub struct AsyncGather {
    branches: Vec<SharedAsyncFunction>,
    policy: GatherPolicy,
}

impl AsyncGather {
    pub fn new(branches: Vec<SharedAsyncFunction>) -> Self {
        Self {
            branches,
            policy: GatherPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: GatherPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Take the failure policy from loaded configuration.
    pub fn with_config(self, config: &FanOutConfig) -> Self {
        self.with_policy(config.gather_policy)
    }

    pub fn policy(&self) -> GatherPolicy {
        self.policy
    }

    /// Add a branch after the existing ones.
    ///
    /// This extends the gather itself. Use `>>` to run something after the
    /// gather instead.
    pub fn append<F: AsyncFunction + 'static>(mut self, branch: F) -> Self {
        self.branches.push(Arc::new(branch));
        self
    }

    /// Add a branch before the existing ones.
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
impl AsyncFunction for AsyncGather {
    fn name(&self) -> &str {
        "async_gather"
    }

    async fn invoke(&self, input: Value) -> Result<Value> {
        tracing::debug!(branches = self.branches.len(), policy = ?self.policy, "gathering");
        let calls = self.branches.iter().map(|branch| branch.invoke(input.clone()));

        let results = match self.policy {
            GatherPolicy::WaitAll => join_all(calls)
                .await
                .into_iter()
                .collect::<Result<Vec<_>>>()?,
            GatherPolicy::FailFast => try_join_all(calls).await?,
        };
        Ok(Value::Array(results))
    }

    fn gather<F>(self, other: F) -> AsyncGather
    where
        F: AsyncFunction + 'static,
    {
        AsyncGather::append(self, other)
    }
}

impl fmt::Debug for AsyncGather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncGather")
            .field("branches", &self.branch_names())
            .field("policy", &self.policy)
            .finish()
    }
}
