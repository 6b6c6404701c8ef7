use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use pipeworks_types::value::{compare, into_array, kind_of};
use pipeworks_types::{FuncError, Map, Result, UnaryOps, Value};

use crate::function::{Function, KeyFn};

/// Bucket the elements of a sequence by a derived key.
///
/// The output is an object mapping each key to the elements that produced
/// it, in input order. String keys are used as they are; any other key is
/// rendered as compact JSON (`1`, `true`, `[1,2]`).
#[derive(Clone)]
pub struct GroupBy {
    key: KeyFn,
    inner_key: Option<KeyFn>,
}

impl GroupBy {
    pub fn new<K>(key: K) -> Self
    where
        K: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            key: Arc::new(key),
            inner_key: None,
        }
    }

    /// Sort each group by a second key. The sort is stable.
    pub fn sort_groups_by<K>(mut self, key: K) -> Self
    where
        K: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.inner_key = Some(Arc::new(key));
        self
    }
}

impl Function for GroupBy {
    fn name(&self) -> &str {
        "group_by"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let mut groups: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        for item in into_array(input)? {
            let key = key_string((self.key)(&item)?);
            groups.entry(key).or_default().push(item);
        }

        if let Some(inner_key) = &self.inner_key {
            for members in groups.values_mut() {
                sort_by_key(members, inner_key)?;
            }
        }
        Ok(Value::Object(
            groups
                .into_iter()
                .map(|(key, members)| (key, Value::Array(members)))
                .collect::<Map<String, Value>>(),
        ))
    }
}

fn key_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn sort_by_key(items: &mut Vec<Value>, key: &KeyFn) -> Result<()> {
    let mut keyed = items
        .drain(..)
        .map(|item| Ok((key(&item)?, item)))
        .collect::<Result<Vec<_>>>()?;

    let mut failure = None;
    keyed.sort_by(|(a, _), (b, _)| {
        compare(a, b).unwrap_or_else(|| {
            failure.get_or_insert_with(|| FuncError::Incomparable {
                op: UnaryOps::Lt,
                left: kind_of(a).to_string(),
                right: kind_of(b).to_string(),
            });
            Ordering::Equal
        })
    });
    if let Some(err) = failure {
        return Err(err);
    }

    items.extend(keyed.into_iter().map(|(_, item)| item));
    Ok(())
}

/// Split a sequence into consecutive chunks of `size` elements. The last
/// chunk holds the remainder and may be shorter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    size: NonZeroUsize,
}

impl Chunk {
    pub fn new(size: NonZeroUsize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }
}

impl Function for Chunk {
    fn name(&self) -> &str {
        "chunk"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let chunks = into_array(input)?
            .chunks(self.size.get())
            .map(|chunk| Value::Array(chunk.to_vec()))
            .collect();
        Ok(Value::Array(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeworks_types::{json, value};
    use proptest::prelude::*;

    fn parity(x: &Value) -> Result<Value> {
        Ok(json!(if value::as_i64(x)? % 2 == 0 { "even" } else { "odd" }))
    }

    fn chunk(size: usize) -> Chunk {
        Chunk::new(NonZeroUsize::new(size).unwrap())
    }

    #[test]
    fn groups_keep_input_order() {
        let grouped = GroupBy::new(parity).invoke(json!([3, 1, 4, 1, 5, 9, 2, 6])).unwrap();
        assert_eq!(grouped, json!({"odd": [3, 1, 1, 5, 9], "even": [4, 2, 6]}));
    }

    #[test]
    fn non_string_keys_are_rendered_as_json() {
        let by_len = GroupBy::new(|s| Ok(json!(value::length(s)?)));
        let grouped = by_len.invoke(json!(["ab", "c", "de"])).unwrap();
        assert_eq!(grouped, json!({"1": ["c"], "2": ["ab", "de"]}));
    }

    #[test]
    fn groups_can_be_sorted() {
        let grouped = GroupBy::new(parity)
            .sort_groups_by(|x| Ok(json!(-value::as_i64(x)?)))
            .invoke(json!([1, 2, 3, 4]))
            .unwrap();
        assert_eq!(grouped, json!({"odd": [3, 1], "even": [4, 2]}));
    }

    #[test]
    fn unorderable_sort_keys_fail() {
        let err = GroupBy::new(|_| Ok(json!("all")))
            .sort_groups_by(|x| Ok(x.clone()))
            .invoke(json!([1, "one"]))
            .unwrap_err();
        assert_eq!(err.kind(), "Incomparable");
    }

    #[test]
    fn key_failures_propagate() {
        let err = GroupBy::new(parity).invoke(json!([1, "x"])).unwrap_err();
        assert_eq!(err.kind(), "TypeMismatch");
        assert_eq!(GroupBy::new(parity).invoke(json!([])).unwrap(), json!({}));
    }

    #[test]
    fn last_chunk_holds_the_remainder() {
        assert_eq!(
            chunk(2).invoke(json!([1, 2, 3, 4, 5])).unwrap(),
            json!([[1, 2], [3, 4], [5]])
        );
        assert_eq!(chunk(3).invoke(json!([])).unwrap(), json!([]));
        assert_eq!(chunk(1).size(), 1);
    }

    proptest! {
        #[test]
        fn chunks_concatenate_back_to_the_input(
            xs in prop::collection::vec(any::<i32>(), 0..40),
            size in 1usize..8,
        ) {
            let out = value::into_array(chunk(size).invoke(json!(xs)).unwrap()).unwrap();
            let mut rejoined = Vec::new();
            for (i, part) in out.iter().enumerate() {
                let part = value::as_array(part).unwrap();
                if i + 1 < out.len() {
                    prop_assert_eq!(part.len(), size);
                }
                rejoined.extend(part.iter().cloned());
            }
            prop_assert_eq!(json!(rejoined), json!(xs));
        }
    }
}
