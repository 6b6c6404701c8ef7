//! Lower-case constructors for every combinator.
//!
//! These read like a small vocabulary when a pipeline is spelled out
//! inline:
//!
//! ```rust
//! use pipeworks::shorthand::{assert_quantity, filter_list, map_list};
//! use pipeworks::{json, pipe, value, Function};
//!
//! let pipeline = pipe![
//!     map_list(|x| Ok(json!(value::as_i64(&x)? * 2))),
//!     filter_list(|x| Ok(value::as_i64(x)? > 5)),
//!     assert_quantity(">=", 2)?,
//! ];
//! assert_eq!(pipeline.invoke(json!([1, 2, 3, 4, 5]))?, json!([6, 8, 10]));
//! # Ok::<(), pipeworks::FuncError>(())
//! ```

use std::future::Future;
use std::num::NonZeroUsize;

use pipeworks_async::{AsyncAdapter, AsyncGather, AsyncRace, AsyncSeq, SharedAsyncFunction};
use pipeworks_core::{
    AssertQuantity, Attempt, Chunk, Construct, Filter, FilterList, FlatMap, Function, GroupBy,
    Head, Init, Last, Map, MapList, Pipe, Reduce, SharedFunction, Tail,
};
use pipeworks_types::{FuncError, Result, Value};

pub fn head() -> Head {
    Head
}

/// Same as [`head`].
pub fn first() -> Head {
    Head
}

pub fn tail() -> Tail {
    Tail
}

pub fn last() -> Last {
    Last
}

/// Assert the input length against `n`, with `op` given as a canonical
/// name or an alias (`">="`, `"ge"`, `"GE"`).
pub fn assert_quantity(op: &str, n: usize) -> Result<AssertQuantity> {
    AssertQuantity::parse(op, n)
}

pub fn map<F>(func: F) -> Map
where
    F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
{
    Map::new(func)
}

pub fn map_list<F>(func: F) -> MapList
where
    F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
{
    MapList::new(func)
}

pub fn flat_map<F>(func: F) -> FlatMap
where
    F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
{
    FlatMap::new(func)
}

pub fn filter<P>(predicate: P) -> Filter
where
    P: Fn(&Value) -> Result<bool> + Send + Sync + 'static,
{
    Filter::new(predicate)
}

pub fn filter_list<P>(predicate: P) -> FilterList
where
    P: Fn(&Value) -> Result<bool> + Send + Sync + 'static,
{
    FilterList::new(predicate)
}

pub fn reduce<F>(func: F) -> Reduce
where
    F: Fn(Value, Value) -> Result<Value> + Send + Sync + 'static,
{
    Reduce::new(func)
}

pub fn group_by<K>(key: K) -> GroupBy
where
    K: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
{
    GroupBy::new(key)
}

/// Split into chunks of `size`; a zero size is rejected.
pub fn chunk(size: usize) -> Result<Chunk> {
    NonZeroUsize::new(size)
        .map(Chunk::new)
        .ok_or_else(|| FuncError::msg("chunk size must be at least 1"))
}

pub fn init<C: Construct + 'static>(constructor: C) -> Init {
    Init::new(constructor)
}

/// Wrap `func` without a handler; failures propagate unchanged.
pub fn attempt<F: Function + 'static>(func: F) -> Attempt {
    Attempt::new(func)
}

/// Wrap `func`, recovering failures with `handler`.
pub fn attempt_with<F, H>(func: F, handler: H) -> Attempt
where
    F: Function + 'static,
    H: Fn(FuncError) -> Result<Value> + Send + Sync + 'static,
{
    Attempt::with_handler(func, handler)
}

pub fn pipe(stages: Vec<SharedFunction>) -> Pipe {
    Pipe::new(stages)
}

/// Lift an async closure into an [`AsyncAdapter`].
pub fn future<F, Fut>(func: F) -> AsyncAdapter
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    AsyncAdapter::from_async(func)
}

pub fn apipe(stages: Vec<SharedAsyncFunction>) -> AsyncSeq {
    AsyncSeq::new(stages)
}

pub fn gather(branches: Vec<SharedAsyncFunction>) -> AsyncGather {
    AsyncGather::new(branches)
}

pub fn race(branches: Vec<SharedAsyncFunction>) -> AsyncRace {
    AsyncRace::new(branches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeworks_async::AsyncFunction;
    use pipeworks_types::{json, value};
    use std::sync::Arc;

    #[test]
    fn first_is_head() {
        let input = json!([9, 8]);
        assert_eq!(first().invoke(input.clone()).unwrap(), head().invoke(input).unwrap());
    }

    #[test]
    fn unknown_operator_is_rejected() {
        assert_eq!(
            assert_quantity("??", 1).unwrap_err(),
            FuncError::InvalidOperator("??".into())
        );
    }

    #[test]
    fn vocabulary_builds_a_pipe() {
        let words = pipe(vec![
            Arc::new(flat_map(|s| {
                Ok(json!(value::as_str(&s)?.split(' ').collect::<Vec<_>>()))
            })) as SharedFunction,
            Arc::new(filter_list(|w| Ok(value::length(w)? > 2))) as SharedFunction,
            Arc::new(map_list(|w| Ok(json!(value::as_str(&w)?.to_uppercase())))) as SharedFunction,
            Arc::new(tail()) as SharedFunction,
            Arc::new(last()) as SharedFunction,
        ]);
        assert_eq!(
            words.invoke(json!(["the quick fox", "an old dog"])).unwrap(),
            json!("DOG")
        );
    }

    #[test]
    fn attempt_with_handler() {
        let sum = reduce(|a, b| Ok(json!(value::as_i64(&a)? + value::as_i64(&b)?)));
        let safe = attempt_with(sum, |_| Ok(json!(0)));
        assert_eq!(safe.invoke(json!([])).unwrap(), json!(0));
        assert_eq!(safe.invoke(json!([1, 2])).unwrap(), json!(3));
    }

    #[test]
    fn attempt_without_handler_propagates() {
        let guarded = attempt(head());
        assert!(!guarded.has_handler());
        assert_eq!(guarded.invoke(json!([4, 5])).unwrap(), json!(4));
        assert_eq!(
            guarded.invoke(json!([])).unwrap_err(),
            FuncError::empty_input("head")
        );
    }

    #[test]
    fn filter_yields_absent_marker() {
        let positive = filter(|x| Ok(value::as_f64(x)? > 0.0));
        assert_eq!(positive.invoke(json!(-1)).unwrap(), Value::Null);
        assert_eq!(map(|x| Ok(json!([x]))).invoke(json!(1)).unwrap(), json!([1]));
    }

    #[test]
    fn grouping_and_chunking() {
        let first_letter = group_by(|w| Ok(json!(&value::as_str(w)?[..1])));
        assert_eq!(
            first_letter.invoke(json!(["apple", "bean", "avocado"])).unwrap(),
            json!({"a": ["apple", "avocado"], "b": ["bean"]})
        );
        assert_eq!(chunk(2).unwrap().invoke(json!([1, 2, 3])).unwrap(), json!([[1, 2], [3]]));
        assert!(chunk(0).is_err());
    }

    #[test]
    fn init_builds_from_a_closure() {
        let pair = init(pipeworks_core::FnConstructor::new("pair", |args, _| {
            Ok(json!([args.first(), args.get(1)]))
        }));
        assert_eq!(pair.invoke(json!("a")).unwrap(), json!(["a", null]));
    }

    #[tokio::test]
    async fn async_vocabulary() {
        let shout = future(|x| async move { value::as_str(&x).map(|s| json!(format!("{s}!"))) });
        let echo = AsyncAdapter::new(Ok);

        let seq = apipe(vec![
            Arc::new(shout.clone()) as SharedAsyncFunction,
            Arc::new(echo.clone()) as SharedAsyncFunction,
        ]);
        assert_eq!(seq.invoke(json!("hi")).await.unwrap(), json!("hi!"));

        let fan = gather(vec![
            Arc::new(shout.clone()) as SharedAsyncFunction,
            Arc::new(echo) as SharedAsyncFunction,
        ]);
        assert_eq!(fan.invoke(json!("hi")).await.unwrap(), json!(["hi!", "hi"]));

        let single = race(vec![Arc::new(shout) as SharedAsyncFunction]);
        assert_eq!(single.invoke(json!("hey")).await.unwrap(), json!("hey!"));
    }
}
