use serde::{Deserialize, Serialize};

use pipeworks_types::value::{into_array, length};
use pipeworks_types::{json, FuncError, Result, UnaryOps, Value};

use crate::function::Function;

/// First element of a non-empty sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct Head;

impl Function for Head {
    fn name(&self) -> &str {
        "head"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        into_array(input)?
            .into_iter()
            .next()
            .ok_or_else(|| FuncError::empty_input(self.name()))
    }
}

/// Same combinator as [`Head`].
pub type First = Head;

/// Every element except the first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tail;

impl Function for Tail {
    fn name(&self) -> &str {
        "tail"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let mut items = into_array(input)?;
        if items.is_empty() {
            return Err(FuncError::empty_input(self.name()));
        }
        items.remove(0);
        Ok(Value::Array(items))
    }
}

/// Final element of a non-empty sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct Last;

impl Function for Last {
    fn name(&self) -> &str {
        "last"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        into_array(input)?
            .pop()
            .ok_or_else(|| FuncError::empty_input(self.name()))
    }
}

/// Identity-or-fail gate on the size of the input.
///
/// Passes the input through unchanged when `op(len(input), n)` holds and
/// fails with [`FuncError::QuantityAssertionFailed`] otherwise. The length
/// of arrays, strings and objects is supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertQuantity {
    /// Comparison applied as `op(actual, n)`.
    #[serde(default = "default_op")]
    pub op: UnaryOps,
    /// The bound the length is compared with.
    pub n: usize,
}

fn default_op() -> UnaryOps {
    UnaryOps::Eq
}

impl AssertQuantity {
    pub fn new(op: UnaryOps, n: usize) -> Self {
        Self { op, n }
    }

    /// Create a gate from an operator token such as `">="` or `"GE"`.
    pub fn parse(op: &str, n: usize) -> Result<Self> {
        Ok(Self::new(UnaryOps::from_string(op)?, n))
    }

    /// Shorthand for an exact-length gate.
    pub fn exactly(n: usize) -> Self {
        Self::new(UnaryOps::Eq, n)
    }
}

impl Function for AssertQuantity {
    fn name(&self) -> &str {
        "assert_quantity"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let actual = length(&input)?;
        if self.op.apply(&json!(actual), &json!(self.n))? {
            Ok(input)
        } else {
            Err(FuncError::QuantityAssertionFailed {
                actual,
                op: self.op,
                expected: self.n,
            })
        }
    }
}
