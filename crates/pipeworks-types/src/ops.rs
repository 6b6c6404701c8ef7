//! Binary comparison operators used by assertion combinators.
//!
//! Every operator is resolved from a canonical name (`EQ`, `NOT_IN`, ...) or
//! one of its aliases (`==`, `eq`, `not in`, ...). Canonical names are
//! matched case-sensitively; aliases are matched verbatim.
//!
//! ```
//! use pipeworks_types::{json, UnaryOps};
//!
//! let op = UnaryOps::from_string(">=").unwrap();
//! assert_eq!(op, UnaryOps::Ge);
//! assert!(op.apply(&json!(3), &json!(2)).unwrap());
//! assert!(UnaryOps::from_string("??").is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FuncError, Result};
use crate::value::{compare, kind_of, loose_eq, Value};

/// The closed set of comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UnaryOps {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// `a in b`: the right operand contains the left one.
    In,
    NotIn,
    /// Strict identity of the JSON representation.
    Is,
    IsNot,
}

/// A pure binary predicate over two values.
pub type Predicate = fn(&Value, &Value) -> Result<bool>;

/// Alias table consulted after the canonical names.
const ALIASES: &[(&str, UnaryOps)] = &[
    ("==", UnaryOps::Eq),
    ("=", UnaryOps::Eq),
    ("eq", UnaryOps::Eq),
    ("!=", UnaryOps::Ne),
    ("<>", UnaryOps::Ne),
    ("ne", UnaryOps::Ne),
    ("<", UnaryOps::Lt),
    ("lt", UnaryOps::Lt),
    ("<=", UnaryOps::Le),
    ("le", UnaryOps::Le),
    (">", UnaryOps::Gt),
    ("gt", UnaryOps::Gt),
    (">=", UnaryOps::Ge),
    ("ge", UnaryOps::Ge),
    ("in", UnaryOps::In),
    ("contains", UnaryOps::In),
    ("not in", UnaryOps::NotIn),
    ("not_contains", UnaryOps::NotIn),
    ("is", UnaryOps::Is),
    ("is not", UnaryOps::IsNot),
    ("NOT_IS", UnaryOps::IsNot),
];

impl UnaryOps {
    pub const ALL: [UnaryOps; 10] = [
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::In,
        Self::NotIn,
        Self::Is,
        Self::IsNot,
    ];

    /// Resolve an operator from its canonical name or any alias.
    pub fn from_string(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.canonical_name() == token)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == token)
                    .map(|(_, op)| *op)
            })
            .ok_or_else(|| FuncError::InvalidOperator(token.to_string()))
    }

    /// The canonical upper-case name (`EQ`, `NOT_IN`, ...).
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Lt => "LT",
            Self::Le => "LE",
            Self::Gt => "GT",
            Self::Ge => "GE",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
            Self::Is => "IS",
            Self::IsNot => "IS_NOT",
        }
    }

    /// The symbolic form used in messages (`==`, `not in`, ...).
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Is => "is",
            Self::IsNot => "is not",
        }
    }

    /// The predicate implementing this operator.
    pub fn predicate(&self) -> Predicate {
        match self {
            Self::Eq => eq,
            Self::Ne => ne,
            Self::Lt => lt,
            Self::Le => le,
            Self::Gt => gt,
            Self::Ge => ge,
            Self::In => is_in,
            Self::NotIn => not_in,
            Self::Is => is,
            Self::IsNot => is_not,
        }
    }

    /// Apply the operator to `a` and `b`.
    ///
    /// Operands that cannot be ordered or searched fail with
    /// [`FuncError::Incomparable`]; the failure is never folded into `false`.
    pub fn apply(&self, a: &Value, b: &Value) -> Result<bool> {
        (self.predicate())(a, b)
    }
}

fn eq(a: &Value, b: &Value) -> Result<bool> {
    Ok(loose_eq(a, b))
}

fn ne(a: &Value, b: &Value) -> Result<bool> {
    Ok(!loose_eq(a, b))
}

fn lt(a: &Value, b: &Value) -> Result<bool> {
    ordered(UnaryOps::Lt, a, b).map(|o| o == Ordering::Less)
}

fn le(a: &Value, b: &Value) -> Result<bool> {
    ordered(UnaryOps::Le, a, b).map(|o| o != Ordering::Greater)
}

fn gt(a: &Value, b: &Value) -> Result<bool> {
    ordered(UnaryOps::Gt, a, b).map(|o| o == Ordering::Greater)
}

fn ge(a: &Value, b: &Value) -> Result<bool> {
    ordered(UnaryOps::Ge, a, b).map(|o| o != Ordering::Less)
}

fn is_in(a: &Value, b: &Value) -> Result<bool> {
    contains(UnaryOps::In, b, a)
}

fn not_in(a: &Value, b: &Value) -> Result<bool> {
    contains(UnaryOps::NotIn, b, a).map(|found| !found)
}

fn is(a: &Value, b: &Value) -> Result<bool> {
    Ok(a == b)
}

fn is_not(a: &Value, b: &Value) -> Result<bool> {
    Ok(a != b)
}

fn incomparable(op: UnaryOps, left: &Value, right: &Value) -> FuncError {
    FuncError::Incomparable {
        op,
        left: kind_of(left).to_string(),
        right: kind_of(right).to_string(),
    }
}

fn ordered(op: UnaryOps, a: &Value, b: &Value) -> Result<Ordering> {
    compare(a, b).ok_or_else(|| incomparable(op, a, b))
}

fn contains(op: UnaryOps, container: &Value, item: &Value) -> Result<bool> {
    match (container, item) {
        (Value::Array(items), _) => Ok(items.iter().any(|x| loose_eq(x, item))),
        (Value::String(haystack), Value::String(needle)) => Ok(haystack.contains(needle.as_str())),
        (Value::Object(map), Value::String(key)) => Ok(map.contains_key(key)),
        // Keys are always strings, so no other scalar can be one.
        (Value::Object(_), Value::Null | Value::Bool(_) | Value::Number(_)) => Ok(false),
        _ => Err(incomparable(op, item, container)),
    }
}

impl fmt::Display for UnaryOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for UnaryOps {
    type Err = FuncError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl TryFrom<String> for UnaryOps {
    type Error = FuncError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_string(&value)
    }
}

impl From<UnaryOps> for String {
    fn from(op: UnaryOps) -> Self {
        op.canonical_name().to_string()
    }
}
