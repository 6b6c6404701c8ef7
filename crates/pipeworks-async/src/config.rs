use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;

/// How [`AsyncGather`](crate::AsyncGather) reacts to a failing branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatherPolicy {
    /// Let every branch finish, then report the first failure in declared
    /// order.
    #[default]
    WaitAll,
    /// Report the first failure as soon as it happens and cancel the rest.
    FailFast,
}

/// Configuration for the fan-out combinators.
///
/// ```toml
/// gather_policy = "fail_fast"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanOutConfig {
    /// Failure policy applied by gathers built with `with_config`.
    pub gather_policy: GatherPolicy,
}

impl FanOutConfig {
    /// A configuration whose gathers stop at the first failure.
    pub fn fail_fast() -> Self {
        Self {
            gather_policy: GatherPolicy::FailFast,
        }
    }

    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
