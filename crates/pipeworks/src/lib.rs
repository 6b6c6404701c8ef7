//! Composable function combinators.
//!
//! `pipeworks` bundles the workspace crates behind one dependency:
//!
//! - synchronous combinators and [`Pipe`] from `pipeworks-core`
//! - [`AsyncSeq`], [`AsyncGather`] and [`AsyncRace`] from `pipeworks-async`
//! - the [`Value`] currency, [`FuncError`] and [`UnaryOps`] from
//!   `pipeworks-types`
//! - logging setup from `pipeworks-telemetry`
//!
//! [`shorthand`] offers lower-case constructors (`head()`, `map_list(..)`,
//! `gather(..)`) and [`Settings`] loads logging and fan-out configuration
//! from a single TOML file.
//!
//! ```rust
//! use pipeworks::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), FuncError> {
//! let evens = pipe![
//!     FilterList::new(|x| Ok(value::as_i64(x)? % 2 == 0)),
//!     AssertQuantity::parse(">=", 1)?,
//! ];
//! let lookup = AsyncAdapter::from_function(Attempt::as_optional(evens));
//!
//! let both = lookup.clone() & AsyncAdapter::new(|x| Ok(json!(value::length(&x)?)));
//! assert_eq!(both.invoke(json!([1, 2, 4])).await?, json!([[2, 4], 3]));
//! assert_eq!(lookup.invoke(json!([1, 3])).await?, json!(null));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod settings;
pub mod shorthand;

pub use error::{PipeworksError, PipeworksResult};
pub use settings::Settings;

// Re-export key types
pub use pipeworks_async::{
    AsyncAdapter, AsyncFunction, AsyncGather, AsyncInstrumented, AsyncRace, AsyncSeq,
    ConfigError, FanOutConfig, GatherPolicy, SharedAsyncFunction,
};
pub use pipeworks_core::{
    pipe, AssertQuantity, Attempt, Chunk, Construct, Filter, FilterList, First, FlatMap,
    FnConstructor, Function, GroupBy, Head, Init, Instrumented, Last, Map, MapList,
    ModelConstructor, Pipe, Reduce, SharedFunction, Tail,
};
pub use pipeworks_telemetry::{LogLevel, LoggingConfig, OutputFormat, TelemetryError};
pub use pipeworks_types::{json, value, ErrorReport, FuncError, Result, UnaryOps, Value};

/// The traits, combinators and helpers most pipelines need.
pub mod prelude {
    pub use crate::{
        pipe, AssertQuantity, AsyncAdapter, AsyncFunction, AsyncGather, AsyncRace, AsyncSeq,
        Attempt, Chunk, Filter, FilterList, FlatMap, FuncError, Function, GroupBy, Head, Init,
        Last, Map, MapList, Pipe, Reduce, Tail, UnaryOps, Value,
    };
    pub use pipeworks_types::{json, value};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::{FanOutConfig, PipeworksError, PipeworksResult, SharedFunction};
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn int(x: &Value) -> pipeworks_types::Result<i64> {
        value::as_i64(x)
    }

    fn ints(xs: &[i64]) -> Value {
        json!(xs)
    }

    #[test]
    fn double_filter_assert_pipeline() {
        let pipeline = pipe![
            MapList::new(|x| Ok(json!(int(&x)? * 2))),
            FilterList::new(|x| Ok(int(x)? > 5)),
            AssertQuantity::new(UnaryOps::Ge, 2),
        ];
        assert_eq!(pipeline.invoke(json!([1, 2, 3, 4, 5])).unwrap(), json!([6, 8, 10]));
    }

    #[test]
    fn assert_quantity_keeps_or_rejects() {
        let at_least_two = AssertQuantity::new(UnaryOps::Ge, 2);
        assert_eq!(at_least_two.invoke(json!([1, 2, 3])).unwrap(), json!([1, 2, 3]));
        assert_eq!(
            at_least_two.invoke(json!([1])).unwrap_err(),
            FuncError::QuantityAssertionFailed {
                actual: 1,
                op: UnaryOps::Ge,
                expected: 2
            }
        );
    }

    #[test]
    fn operator_tokens_resolve_to_one_identity() {
        for token in ["==", "eq", "EQ", "="] {
            assert_eq!(UnaryOps::from_string(token).unwrap(), UnaryOps::Eq);
        }
        assert_eq!(
            UnaryOps::from_string("??").unwrap_err(),
            FuncError::InvalidOperator("??".into())
        );
    }

    #[test]
    fn reciprocal_of_zero_is_absent() {
        let reciprocal = Map::new(|x| match value::as_f64(&x)? {
            d if d == 0.0 => Err(FuncError::msg("division by zero")),
            d => Ok(json!(1.0 / d)),
        });
        let safe = Attempt::as_optional(reciprocal);
        assert_eq!(safe.invoke(json!(0)).unwrap(), Value::Null);
        assert_eq!(safe.invoke(json!(2)).unwrap(), json!(0.5));
    }

    #[test]
    fn empty_sequences_fail_with_empty_input() {
        let reduce = Reduce::new(|a, b| Ok(json!(int(&a)? + int(&b)?)));
        let stages: Vec<SharedFunction> = vec![
            Arc::new(Head),
            Arc::new(Tail),
            Arc::new(Last),
            Arc::new(reduce),
        ];
        for stage in stages {
            let err = stage.invoke(json!([])).unwrap_err();
            assert_eq!(err, FuncError::empty_input(stage.name()));
        }
    }

    #[test]
    fn configuration_errors_convert_into_the_facade_error() {
        fn load(path: &std::path::Path) -> PipeworksResult<FanOutConfig> {
            Ok(FanOutConfig::from_file(path)?)
        }
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, PipeworksError::FanOut(_)));
    }

    #[tokio::test]
    async fn gather_preserves_declared_order() {
        let after = |ms: u64, out: i64| {
            AsyncAdapter::from_async(move |_| async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok::<_, FuncError>(json!(out))
            })
        };
        let fan = after(50, 1) & after(1, 2) & after(25, 3);
        assert_eq!(fan.invoke(Value::Null).await.unwrap(), json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn race_resolves_to_the_fast_branch() {
        let slow = AsyncAdapter::from_async(|_| async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            Ok::<_, FuncError>(json!("slow"))
        });
        let fast = AsyncAdapter::from_async(|_| async {
            tokio::time::sleep(Duration::from_millis(2)).await;
            Ok::<_, FuncError>(json!("fast"))
        });
        assert_eq!((slow | fast).invoke(Value::Null).await.unwrap(), json!("fast"));
    }

    proptest! {
        #[test]
        fn head_last_tail_agree_with_indexing(xs in prop::collection::vec(any::<i64>(), 1..32)) {
            let input = ints(&xs);
            prop_assert_eq!(Head.invoke(input.clone()).unwrap(), json!(xs[0]));
            prop_assert_eq!(Last.invoke(input.clone()).unwrap(), json!(xs[xs.len() - 1]));
            prop_assert_eq!(Tail.invoke(input).unwrap(), ints(&xs[1..]));
        }

        #[test]
        fn map_list_applies_elementwise(xs in prop::collection::vec(-1000i64..1000, 0..32)) {
            let out = MapList::new(|x| Ok(json!(int(&x)? * 3 + 1))).invoke(ints(&xs)).unwrap();
            let expected: Vec<i64> = xs.iter().map(|x| x * 3 + 1).collect();
            prop_assert_eq!(out, json!(expected));
        }

        #[test]
        fn flat_map_concatenates_in_order(xs in prop::collection::vec(0i64..5, 0..16)) {
            let repeat = FlatMap::new(|x| {
                let n = int(&x)?;
                Ok(json!(vec![n; n as usize]))
            });
            let expected: Vec<i64> = xs.iter().flat_map(|&n| vec![n; n as usize]).collect();
            prop_assert_eq!(repeat.invoke(ints(&xs)).unwrap(), json!(expected));
        }

        #[test]
        fn filter_list_keeps_the_matching_subsequence(xs in prop::collection::vec(any::<i64>(), 0..32)) {
            let odd = FilterList::new(|x| Ok(int(x)? % 2 != 0));
            let expected: Vec<i64> = xs.iter().copied().filter(|x| x % 2 != 0).collect();
            prop_assert_eq!(odd.invoke(ints(&xs)).unwrap(), json!(expected));
        }

        #[test]
        fn reinvocation_is_idempotent(xs in prop::collection::vec(-100i64..100, 1..16)) {
            let pipeline = MapList::new(|x| Ok(json!(int(&x)? - 1)))
                >> FilterList::new(|x| Ok(int(x)? >= 0))
                >> Attempt::as_optional(Reduce::new(|a, b| Ok(json!(int(&a)?.max(int(&b)?)))));
            let first = pipeline.invoke(ints(&xs)).unwrap();
            let second = pipeline.invoke(ints(&xs)).unwrap();
            prop_assert_eq!(first, second);
            prop_assert_eq!(pipeline.len(), 3);
        }
    }
}
