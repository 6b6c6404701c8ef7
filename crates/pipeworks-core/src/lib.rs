//! Synchronous combinator algebra for pipeworks.
//!
//! A [`Function`] takes one [`Value`](pipeworks_types::Value) and produces
//! one value or a [`FuncError`](pipeworks_types::FuncError). Leaf
//! combinators operate on sequences and scalars; [`Pipe`] threads a value
//! through an ordered list of them; [`Attempt`] turns failures into values.
//! Everything here runs on the caller's thread, without suspension.
//!
//! # Quick Start
//!
//! ```rust
//! use pipeworks_core::{pipe, AssertQuantity, Attempt, FilterList, Function, MapList};
//! use pipeworks_types::{json, value, UnaryOps};
//!
//! let pipeline = Attempt::as_optional(pipe![
//!     MapList::new(|x| Ok(json!(value::as_i64(&x)? * 2))),
//!     FilterList::new(|x| Ok(value::as_i64(x)? > 5)),
//!     AssertQuantity::new(UnaryOps::Ge, 2),
//! ]);
//! assert_eq!(pipeline.invoke(json!([1, 2, 3, 4, 5])).unwrap(), json!([6, 8, 10]));
//! assert_eq!(pipeline.invoke(json!([1, 2, 3])).unwrap(), json!(null));
//! ```

pub mod combinators;
pub mod function;
pub mod pipe;

// Re-exports for convenience.
pub use combinators::{
    AssertQuantity, Attempt, Chunk, Construct, Filter, FilterList, First, FlatMap, FnConstructor,
    GroupBy, Head, Init, Instrumented, Last, Map, MapList, ModelConstructor, Reduce, Tail,
};
pub use function::{BinaryFn, ErrorHandler, Function, KeyFn, PredicateFn, SharedFunction, UnaryFn};
pub use pipe::Pipe;

#[cfg(test)]
mod tests {
    use super::*;
    use pipeworks_types::{json, value, FuncError, UnaryOps, Value};

    fn int(x: &Value) -> pipeworks_types::Result<i64> {
        value::as_i64(x)
    }

    #[test]
    fn attempt_over_a_partial_pipeline() {
        let partial = Attempt::new(
            MapList::new(|x| Ok(json!(int(&x)? * 2))).append(FilterList::new(|x| Ok(int(x)? > 5))),
        );
        assert_eq!(partial.invoke(json!([1, 2, 3, 4, 5])).unwrap(), json!([6, 8, 10]));
    }

    #[test]
    fn assert_quantity_from_alias_inside_a_pipe() {
        let pipeline = crate::pipe![
            FilterList::new(|x| Ok(int(x)? > 5)),
            AssertQuantity::parse(">", 2).unwrap(),
        ];
        assert_eq!(
            pipeline.invoke(json!([6, 8])).unwrap_err(),
            FuncError::QuantityAssertionFailed {
                actual: 2,
                op: UnaryOps::Gt,
                expected: 2
            }
        );
    }

    #[test]
    fn sum_of_squares_of_evens() {
        let pipeline = FilterList::new(|x| Ok(int(x)? % 2 == 0))
            >> MapList::new(|x| Ok(json!(int(&x)?.pow(2))))
            >> Reduce::new(|a, b| Ok(json!(int(&a)? + int(&b)?)));
        assert_eq!(pipeline.invoke(json!([1, 2, 3, 4])).unwrap(), json!(20));
        assert_eq!(
            pipeline.invoke(json!([1, 3])).unwrap_err(),
            FuncError::empty_input("reduce")
        );
    }

    #[test]
    fn filter_then_map_handles_the_absent_marker() {
        let pipeline = Filter::new(|x| Ok(x.is_string())) >> Map::new(|x| Ok(json!(x.is_null())));
        assert_eq!(pipeline.invoke(json!("a")).unwrap(), json!(false));
        assert_eq!(pipeline.invoke(json!(1)).unwrap(), json!(true));
    }
}
