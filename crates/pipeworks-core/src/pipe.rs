use std::fmt;
use std::sync::Arc;

use pipeworks_types::{Result, Value};

use crate::function::{Function, SharedFunction};

// ---------------------------------------------------------------------------
// Pipe
// ---------------------------------------------------------------------------

/// Sequential composition: the output of stage `i` is the input of stage
/// `i + 1`.
///
/// The pipe is **fail-fast**: the first stage that fails stops evaluation
/// and its error reaches the caller unchanged. An empty pipe is the
/// identity function.
///
/// A pipe owns a growable list of shared stages. Unlike the leaf
/// combinators, [`Function::append`] and [`Function::prepend`] on a `Pipe`
/// extend this same list and hand the same pipe back; [`Pipe::push`] and
/// [`Pipe::push_front`] do the same in place through `&mut self`. The list
/// only ever grows, and invoking the pipe never mutates it.
#[derive(Clone, Default)]
pub struct Pipe {
    stages: Vec<SharedFunction>,
}

impl Pipe {
    /// Create a pipe from an ordered list of stages.
    pub fn new(stages: Vec<SharedFunction>) -> Self {
        Self { stages }
    }

    /// The identity pipe.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A single-stage pipe.
    pub fn of<F: Function + 'static>(stage: F) -> Self {
        Self::new(vec![Arc::new(stage) as SharedFunction])
    }

    /// Append a stage to the end of the pipe.
    pub fn push<F: Function + 'static>(&mut self, stage: F) -> &mut Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Insert a stage at the front of the pipe.
    pub fn push_front<F: Function + 'static>(&mut self, stage: F) -> &mut Self {
        self.stages.insert(0, Arc::new(stage));
        self
    }

    /// Append an already shared stage.
    pub fn push_shared(&mut self, stage: SharedFunction) -> &mut Self {
        self.stages.push(stage);
        self
    }

    /// Number of stages in the pipe.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Names of the stages, in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// The stages, in execution order.
    pub fn stages(&self) -> &[SharedFunction] {
        &self.stages
    }
}

impl Function for Pipe {
    fn name(&self) -> &str {
        "pipe"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        let mut value = input;
        for (index, stage) in self.stages.iter().enumerate() {
            tracing::trace!(stage = stage.name(), index, "running pipe stage");
            value = stage.invoke(value).inspect_err(|err| {
                tracing::debug!(stage = stage.name(), index, error = %err, "pipe aborted");
            })?;
        }
        Ok(value)
    }

    fn prepend<F>(mut self, other: F) -> Pipe
    where
        F: Function + 'static,
    {
        self.push_front(other);
        self
    }

    fn append<F>(mut self, other: F) -> Pipe
    where
        F: Function + 'static,
    {
        self.push(other);
        self
    }
}

impl FromIterator<SharedFunction> for Pipe {
    fn from_iter<I: IntoIterator<Item = SharedFunction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Build a [`Pipe`] from any number of stages.
///
/// ```
/// use pipeworks_core::{pipe, Function, Head, Tail};
/// use pipeworks_types::json;
///
/// let second = pipe![Tail, Head];
/// assert_eq!(second.invoke(json!(["a", "b", "c"])).unwrap(), json!("b"));
/// ```
#[macro_export]
macro_rules! pipe {
    () => {
        $crate::Pipe::empty()
    };
    ($($stage:expr),+ $(,)?) => {
        $crate::Pipe::new(vec![
            $(::std::sync::Arc::new($stage) as $crate::SharedFunction),+
        ])
    };
}
