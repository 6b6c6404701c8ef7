//! The data currency threaded through every combinator.
//!
//! Pipelines carry [`serde_json::Value`]: ordered sequences are
//! `Value::Array` and the absent marker is `Value::Null`. The accessors in
//! this module fail with [`FuncError::TypeMismatch`] rather than panic, so
//! user closures can use `?` on them.

use std::cmp::Ordering;

pub use serde_json::{json, Map, Value};

use crate::error::{FuncError, Result};

/// Short name of the JSON kind of `value`.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Borrow `value` as an ordered sequence.
pub fn as_array(value: &Value) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| FuncError::type_mismatch("array", value))
}

/// Take ownership of `value` as an ordered sequence.
pub fn into_array(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(FuncError::type_mismatch("array", &other)),
    }
}

pub fn as_i64(value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| FuncError::type_mismatch("integer", value))
}

pub fn as_f64(value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| FuncError::type_mismatch("number", value))
}

pub fn as_str(value: &Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| FuncError::type_mismatch("string", value))
}

pub fn as_bool(value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| FuncError::type_mismatch("bool", value))
}

/// Number of elements in a sized value.
///
/// Arrays count items, strings count characters and objects count entries.
pub fn length(value: &Value) -> Result<usize> {
    match value {
        Value::Array(items) => Ok(items.len()),
        Value::String(s) => Ok(s.chars().count()),
        Value::Object(map) => Ok(map.len()),
        other => Err(FuncError::type_mismatch("sized value", other)),
    }
}

/// Equality where numbers compare by numeric value, so `1 == 1.0`.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => {
            compare_numbers(a, b) == Some(Ordering::Equal)
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| loose_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| loose_eq(x, y)))
        }
        _ => a == b,
    }
}

/// Ordering between two values, or `None` when they are not comparable.
///
/// Numbers, strings and booleans order naturally; arrays order
/// lexicographically element by element. Null and objects never order.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_numbers(a, b),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Array(xs), Value::Array(ys)) => {
            for (x, y) in xs.iter().zip(ys) {
                match compare(x, y)? {
                    Ordering::Equal => continue,
                    unequal => return Some(unequal),
                }
            }
            Some(xs.len().cmp(&ys.len()))
        }
        _ => None,
    }
}

fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    match (as_integer(a), as_integer(b)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        (Some(x), None) => compare_integer_to_float(x, b.as_f64()?),
        (None, Some(y)) => compare_integer_to_float(y, a.as_f64()?).map(Ordering::reverse),
        (None, None) => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

/// Exact comparison; the integer is never rounded through `f64`.
fn compare_integer_to_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    let bound = 2f64.powi(127);
    let floor = float.floor();
    if floor >= bound {
        return Some(Ordering::Less);
    }
    if floor < -bound {
        return Some(Ordering::Greater);
    }
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Some(Ordering::Less),
        ord => Some(ord),
    }
}
