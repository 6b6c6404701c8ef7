use std::sync::Arc;

use pipeworks_types::{FuncError, Result, Value};

use crate::pipe::Pipe;

// ---------------------------------------------------------------------------
// Closure shapes accepted by the leaf combinators
// ---------------------------------------------------------------------------

/// A unary transform.
pub type UnaryFn = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// A predicate over a borrowed value.
pub type PredicateFn = Arc<dyn Fn(&Value) -> Result<bool> + Send + Sync>;

/// Derives a key from a borrowed value.
pub type KeyFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// A binary fold step: `(accumulator, next) -> accumulator`.
pub type BinaryFn = Arc<dyn Fn(Value, Value) -> Result<Value> + Send + Sync>;

/// Turns a failure into a replacement value (or a different failure).
pub type ErrorHandler = Arc<dyn Fn(FuncError) -> Result<Value> + Send + Sync>;

/// A function stage shared by reference between pipelines.
pub type SharedFunction = Arc<dyn Function>;

// ---------------------------------------------------------------------------
// Function trait
// ---------------------------------------------------------------------------

/// A composable unit of behaviour: one value in, one value out.
///
/// Every combinator in this crate implements `Function`. The trait is
/// object-safe and `Send + Sync` so stages can be stored in a
/// `Vec<Arc<dyn Function>>` and shared between pipelines.
///
/// # Composition
///
/// [`Function::prepend`] and [`Function::append`] consume both operands and
/// build a fresh two-stage [`Pipe`]. A `Pipe` overrides both methods to
/// extend its own stage list and return itself, so chaining onto an
/// existing pipe never allocates a new wrapper:
///
/// ```
/// use pipeworks_core::{Function, Head, Tail};
/// use pipeworks_types::json;
///
/// let pipe = Tail.append(Tail).append(Head); // one Pipe with three stages
/// assert_eq!(pipe.len(), 3);
/// assert_eq!(pipe.invoke(json!([1, 2, 3, 4])).unwrap(), json!(3));
/// ```
pub trait Function: Send + Sync {
    /// Short name used in logs and error messages (e.g. "head", "pipe").
    fn name(&self) -> &str;

    /// Apply the function to `input`.
    fn invoke(&self, input: Value) -> Result<Value>;

    /// Build the pipeline `other -> self`.
    fn prepend<F>(self, other: F) -> Pipe
    where
        Self: Sized + 'static,
        F: Function + 'static,
    {
        Pipe::new(vec![Arc::new(other) as SharedFunction, Arc::new(self)])
    }

    /// Build the pipeline `self -> other`.
    fn append<F>(self, other: F) -> Pipe
    where
        Self: Sized + 'static,
        F: Function + 'static,
    {
        Pipe::new(vec![Arc::new(self) as SharedFunction, Arc::new(other)])
    }
}

impl<F: Function + ?Sized> Function for Arc<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        (**self).invoke(input)
    }
}

impl<F: Function + ?Sized> Function for Box<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        (**self).invoke(input)
    }
}

/// `a >> b` is shorthand for `a.append(b)`.
macro_rules! impl_followed_by {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<G: Function + 'static> std::ops::Shr<G> for $ty {
                type Output = Pipe;

                fn shr(self, next: G) -> Pipe {
                    Function::append(self, next)
                }
            }
        )*
    };
}

impl_followed_by!(
    crate::combinators::Head,
    crate::combinators::Tail,
    crate::combinators::Last,
    crate::combinators::AssertQuantity,
    crate::combinators::Map,
    crate::combinators::MapList,
    crate::combinators::FlatMap,
    crate::combinators::Filter,
    crate::combinators::FilterList,
    crate::combinators::Reduce,
    crate::combinators::Init,
    crate::combinators::Attempt,
    crate::combinators::Instrumented,
    Pipe,
);
