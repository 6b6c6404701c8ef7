use std::any::type_name;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use pipeworks_types::{FuncError, Map, Result, Value};

use crate::function::Function;

/// Something that can build a value from positional and keyword arguments.
pub trait Construct: Send + Sync {
    /// Name of the type being constructed, used in error messages.
    fn target(&self) -> &str;

    fn construct(&self, args: &[Value], kwargs: &Map<String, Value>) -> Result<Value>;
}

/// A [`Construct`] backed by a closure.
pub struct FnConstructor<F> {
    target: String,
    func: F,
}

impl<F> FnConstructor<F> {
    pub fn new(target: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value], &Map<String, Value>) -> Result<Value> + Send + Sync,
    {
        Self {
            target: target.into(),
            func,
        }
    }
}

impl<F> Construct for FnConstructor<F>
where
    F: Fn(&[Value], &Map<String, Value>) -> Result<Value> + Send + Sync,
{
    fn target(&self) -> &str {
        &self.target
    }

    fn construct(&self, args: &[Value], kwargs: &Map<String, Value>) -> Result<Value> {
        (self.func)(args, kwargs)
    }
}

/// A [`Construct`] that builds a serde type and returns its serialized form.
///
/// Keyword arguments are deserialized as the fields of `T`. A single
/// positional argument is deserialized as `T` itself; several positional
/// arguments are deserialized from an array (tuple structs).
pub struct ModelConstructor<T> {
    _model: PhantomData<fn() -> T>,
}

impl<T> ModelConstructor<T> {
    pub fn new() -> Self {
        Self {
            _model: PhantomData,
        }
    }
}

impl<T> Default for ModelConstructor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Construct for ModelConstructor<T>
where
    T: DeserializeOwned + Serialize,
{
    fn target(&self) -> &str {
        type_name::<T>()
    }

    fn construct(&self, args: &[Value], kwargs: &Map<String, Value>) -> Result<Value> {
        let source = match (args, kwargs.is_empty()) {
            ([], _) => Value::Object(kwargs.clone()),
            ([single], true) => single.clone(),
            (many, true) => Value::Array(many.to_vec()),
            (_, false) => {
                return Err(FuncError::Construct {
                    target: self.target().to_string(),
                    message: "positional and keyword arguments cannot be mixed".into(),
                })
            }
        };
        let fail = |err: serde_json::Error| FuncError::Construct {
            target: self.target().to_string(),
            message: err.to_string(),
        };
        let model: T = serde_json::from_value(source).map_err(fail)?;
        serde_json::to_value(&model).map_err(fail)
    }
}

/// Construct an instance of a target type.
///
/// The stored `args`/`kwargs` are the defaults. Invoking with `Value::Null`
/// uses them; invoking with any other value passes that value as the only
/// positional argument, which makes `Init` usable inside `MapList`.
/// Call-time arguments replace the defaults entirely; they are never
/// merged.
#[derive(Clone)]
pub struct Init {
    constructor: Arc<dyn Construct>,
    args: Vec<Value>,
    kwargs: Map<String, Value>,
}

impl Init {
    pub fn new<C: Construct + 'static>(constructor: C) -> Self {
        Self {
            constructor: Arc::new(constructor),
            args: Vec::new(),
            kwargs: Map::new(),
        }
    }

    /// Construct through a closure.
    pub fn from_fn<F>(target: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value], &Map<String, Value>) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(FnConstructor::new(target, func))
    }

    /// Construct the serde type `T`.
    pub fn model<T>() -> Self
    where
        T: DeserializeOwned + Serialize + 'static,
    {
        Self::new(ModelConstructor::<T>::new())
    }

    /// Set the default positional arguments.
    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = args;
        self
    }

    /// Set the default keyword arguments.
    pub fn with_kwargs(mut self, kwargs: Map<String, Value>) -> Self {
        self.kwargs = kwargs;
        self
    }

    /// Construct with explicit call-time arguments.
    ///
    /// When both are empty the stored defaults are used instead.
    pub fn call_with(&self, args: &[Value], kwargs: &Map<String, Value>) -> Result<Value> {
        if args.is_empty() && kwargs.is_empty() {
            self.constructor.construct(&self.args, &self.kwargs)
        } else {
            self.constructor.construct(args, kwargs)
        }
    }
}

impl Function for Init {
    fn name(&self) -> &str {
        "init"
    }

    fn invoke(&self, input: Value) -> Result<Value> {
        match input {
            Value::Null => self.call_with(&[], &Map::new()),
            value => self.call_with(&[value], &Map::new()),
        }
    }
}
