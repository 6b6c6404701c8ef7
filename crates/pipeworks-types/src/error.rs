use std::fmt;

use crate::ops::UnaryOps;
use crate::value::{kind_of, Value};

/// Errors raised while building or invoking a combinator.
///
/// Combinators never wrap the errors they propagate: a failure raised by a
/// user-supplied closure reaches the caller as the same [`FuncError::User`]
/// value, with its message and source chain intact.
#[derive(Debug, thiserror::Error)]
pub enum FuncError {
    /// A sequence combinator received an empty sequence.
    #[error("{combinator}: input sequence is empty")]
    EmptyInput { combinator: String },

    /// An operator token matched no canonical name and no alias.
    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    /// A quantity gate rejected its input.
    #[error("data contains {actual} elements, expected {op} {expected}")]
    QuantityAssertionFailed {
        actual: usize,
        op: UnaryOps,
        expected: usize,
    },

    /// The input value does not have the shape the combinator needs.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The operands cannot be compared with the given operator.
    #[error("cannot apply '{op}' to {left} and {right}")]
    Incomparable {
        op: UnaryOps,
        left: String,
        right: String,
    },

    /// A fan-out combinator has no branches to run.
    #[error("{combinator}: no functions to run")]
    EmptyComposition { combinator: String },

    /// A constructor rejected its arguments.
    #[error("failed to construct {target}: {message}")]
    Construct { target: String, message: String },

    /// A worker task panicked or was cancelled before producing a value.
    #[error("task error: {0}")]
    Task(String),

    /// Any failure raised by user code.
    #[error(transparent)]
    User(#[from] anyhow::Error),
}

impl FuncError {
    /// Wrap an arbitrary error raised by user code.
    pub fn user(err: impl Into<anyhow::Error>) -> Self {
        Self::User(err.into())
    }

    /// Build a user error from a plain message.
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self::User(anyhow::Error::msg(message))
    }

    /// Create an empty-input error for the named combinator.
    pub fn empty_input(combinator: impl Into<String>) -> Self {
        Self::EmptyInput {
            combinator: combinator.into(),
        }
    }

    /// Create a type mismatch describing the offending value.
    pub fn type_mismatch(expected: impl Into<String>, found: &Value) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: kind_of(found).to_string(),
        }
    }

    /// Stable name of the variant, used in error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput { .. } => "EmptyInput",
            Self::InvalidOperator(_) => "InvalidOperator",
            Self::QuantityAssertionFailed { .. } => "QuantityAssertionFailed",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::Incomparable { .. } => "Incomparable",
            Self::EmptyComposition { .. } => "EmptyComposition",
            Self::Construct { .. } => "Construct",
            Self::Task(_) => "Task",
            Self::User(_) => "User",
        }
    }

    /// Returns `true` if the error originated in user code.
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// Borrow the original user error as its concrete type, if it is one.
    pub fn user_error<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            Self::User(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl PartialEq for FuncError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        self.kind() == other.kind() && self.to_string() == other.to_string()
    }
}

impl Eq for FuncError {}

/// Result alias used across every pipeworks crate.
pub type Result<T> = std::result::Result<T, FuncError>;
