use std::sync::Arc;

use pipeworks_types::value::into_array;
use pipeworks_types::{FuncError, Result, Value};

use crate::function::{BinaryFn, Function, PredicateFn, UnaryFn};

/// Apply a transform to a single value (1-to-1, not list-aware).
#[derive(Clone)]
pub struct Map {
    func: UnaryFn,
}

impl Map {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self { func: Arc::new(func) }
    }
}

impl Function for Map {
    fn name(&self) -> &str {
        "map"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        (self.func)(input)
    }
}

/// Apply a transform to every element of a sequence, preserving order and
/// length.
#[derive(Clone)]
pub struct MapList {
    func: UnaryFn,
}

impl MapList {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self { func: Arc::new(func) }
    }
}

impl Function for MapList {
    fn name(&self) -> &str {
        "map_list"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        into_array(input)?
            .into_iter()
            .map(|item| (self.func)(item))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}

/// Apply a sequence-producing transform to every element and concatenate
/// the results in input order. Exactly one level is flattened.
#[derive(Clone)]
pub struct FlatMap {
    func: UnaryFn,
}

impl FlatMap {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self { func: Arc::new(func) }
    }
}

impl Function for FlatMap {
    fn name(&self) -> &str {
        "flat_map"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let mut flattened = Vec::new();
        for item in into_array(input)? {
            flattened.extend(into_array((self.func)(item)?)?);
        }
        Ok(Value::Array(flattened))
    }
}

/// Keep a single value when the predicate holds.
///
/// A rejected value becomes `Value::Null`, the absent marker. Rejection is
/// not an error.
#[derive(Clone)]
pub struct Filter {
    predicate: PredicateFn,
}

impl Filter {
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&Value) -> Result<bool> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }
}

impl Function for Filter {
    fn name(&self) -> &str {
        "filter"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        if (self.predicate)(&input)? {
            Ok(input)
        } else {
            Ok(Value::Null)
        }
    }
}

/// Keep the elements of a sequence for which the predicate holds, in their
/// original relative order.
#[derive(Clone)]
pub struct FilterList {
    predicate: PredicateFn,
}

impl FilterList {
    pub fn new<P>(predicate: P) -> Self
    where
        P: Fn(&Value) -> Result<bool> + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }
}

impl Function for FilterList {
    fn name(&self) -> &str {
        "filter_list"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let mut kept = Vec::new();
        for item in into_array(input)? {
            if (self.predicate)(&item)? {
                kept.push(item);
            }
        }
        Ok(Value::Array(kept))
    }
}

/// Left fold over a non-empty sequence, seeded with its first element.
#[derive(Clone)]
pub struct Reduce {
    func: BinaryFn,
}

impl Reduce {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Value, Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self { func: Arc::new(func) }
    }
}

impl Function for Reduce {
    fn name(&self) -> &str {
        "reduce"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let mut items = into_array(input)?.into_iter();
        let seed = items
            .next()
            .ok_or_else(|| FuncError::empty_input(self.name()))?;
        items.try_fold(seed, |acc, next| (self.func)(acc, next))
    }
}
