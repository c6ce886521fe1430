//! Callable values and argument binding
//!
//! Design: a function is a [`Signature`] plus a Rust closure body.
//! - Defaults are `Value`s captured when the signature is built, so a
//!   mutable default is one shared object across every call that omits it
//! - Binding follows the interpreter's priority: positional slots, then
//!   keywords, then defaults, with `*args`/`**kwargs` collecting the rest
//! - Annotations are carried for display only and never enforced

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::{DictMap, Type, Value};
use crate::errors::{LessonError, Result};
use crate::logging::{debug, trace};

/// One declared parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub default: Option<Value>,
    pub annotation: Option<Type>,
}

impl Param {
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match (&self.annotation, &self.default) {
            (Some(ty), Some(default)) => write!(f, ": {} = {}", ty, default.repr()),
            (Some(ty), None) => write!(f, ": {}", ty),
            (None, Some(default)) => write!(f, "={}", default.repr()),
            (None, None) => Ok(()),
        }
    }
}

/// Parameter list of a function
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    params: Vec<Param>,
    varargs: Option<String>,
    varkw: Option<String>,
    returns: Option<Type>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            varargs: None,
            varkw: None,
            returns: None,
        }
    }

    /// Anonymous single-expression function parameters
    pub fn lambda(params: &[&str]) -> Self {
        params.iter().fold(Self::new("<lambda>"), |sig, p| sig.required(*p))
    }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param { name: name.into(), default: None, annotation: None });
        self
    }

    /// Parameter with a default. `value` is evaluated here, once.
    pub fn default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: Some(value.into()),
            annotation: None,
        });
        self
    }

    pub fn typed(mut self, name: impl Into<String>, annotation: Type) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: None,
            annotation: Some(annotation),
        });
        self
    }

    pub fn typed_default(mut self, name: impl Into<String>, annotation: Type, value: impl Into<Value>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: Some(value.into()),
            annotation: Some(annotation),
        });
        self
    }

    /// `*name`
    pub fn varargs(mut self, name: impl Into<String>) -> Self {
        self.varargs = Some(name.into());
        self
    }

    /// `**name`
    pub fn varkw(mut self, name: impl Into<String>) -> Self {
        self.varkw = Some(name.into());
        self
    }

    pub fn returns(mut self, annotation: Type) -> Self {
        self.returns = Some(annotation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Definition-time checks: unique names, no required parameter after a defaulted one
    pub fn validate(&self) -> Result<()> {
        let mut seen_default = false;
        for (i, param) in self.params.iter().enumerate() {
            if self.params[..i].iter().any(|p| p.name == param.name) {
                return Err(LessonError::argument(
                    &self.name,
                    format!("duplicate argument '{}' in function definition", param.name),
                ));
            }
            if param.is_required() && seen_default {
                return Err(LessonError::argument(
                    &self.name,
                    format!("non-default argument '{}' follows default argument", param.name),
                ));
            }
            seen_default |= !param.is_required();
        }
        Ok(())
    }

    /// Bind call arguments to parameters.
    ///
    /// Fails with ArgumentError on surplus positionals without `*args`,
    /// duplicate bindings, unknown keywords without `**kwargs`, and required
    /// parameters left unbound.
    pub fn bind(&self, args: CallArgs) -> Result<BoundArgs> {
        let CallArgs { positional, keywords } = args;
        let mut slots: Vec<Option<Value>> = vec![None; self.params.len()];
        let mut extra_positional = Vec::new();
        let mut extra_keywords = DictMap::new();

        let declared = self.params.len();
        let given = positional.len();
        for (i, value) in positional.into_iter().enumerate() {
            if i < declared {
                slots[i] = Some(value);
            } else if self.varargs.is_some() {
                extra_positional.push(value);
            } else {
                return Err(LessonError::argument(
                    &self.name,
                    format!(
                        "takes {} positional argument{} but {} {} given",
                        declared,
                        if declared == 1 { "" } else { "s" },
                        given,
                        if given == 1 { "was" } else { "were" }
                    ),
                ));
            }
        }

        for (key, value) in keywords {
            match self.params.iter().position(|p| p.name == key) {
                Some(i) if slots[i].is_some() => {
                    return Err(LessonError::argument(
                        &self.name,
                        format!("got multiple values for argument '{}'", key),
                    ));
                }
                Some(i) => slots[i] = Some(value),
                None if self.varkw.is_some() => {
                    if extra_keywords.insert(key.clone(), value).is_some() {
                        return Err(LessonError::argument(
                            &self.name,
                            format!("got multiple values for keyword argument '{}'", key),
                        ));
                    }
                }
                None => {
                    return Err(LessonError::argument(
                        &self.name,
                        format!("got an unexpected keyword argument '{}'", key),
                    ));
                }
            }
        }

        let mut bound = IndexMap::with_capacity(declared);
        let mut missing = Vec::new();
        for (param, slot) in self.params.iter().zip(slots) {
            match slot.or_else(|| param.default.clone()) {
                Some(value) => {
                    bound.insert(param.name.clone(), value);
                }
                None => missing.push(format!("'{}'", param.name)),
            }
        }
        if !missing.is_empty() {
            return Err(LessonError::argument(
                &self.name,
                format!(
                    "missing required argument{}: {}",
                    if missing.len() == 1 { "" } else { "s" },
                    missing.join(", ")
                ),
            ));
        }

        trace!(
            function = %self.name,
            bound = bound.len(),
            extra_positional = extra_positional.len(),
            extra_keywords = extra_keywords.len(),
            "arguments bound"
        );

        Ok(BoundArgs {
            function: self.name.clone(),
            values: bound,
            extra_positional,
            extra_keywords,
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.params.iter().map(Param::to_string).collect();
        if let Some(name) = &self.varargs {
            parts.push(format!("*{}", name));
        }
        if let Some(name) = &self.varkw {
            parts.push(format!("**{}", name));
        }
        write!(f, "{}({})", self.name, parts.join(", "))?;
        if let Some(ret) = &self.returns {
            write!(f, " -> {}", ret)?;
        }
        Ok(())
    }
}

/// Arguments at a call site
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call with positional arguments only
    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keywords: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// `name=value`
    pub fn kw(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }
}

/// Result of binding: every declared parameter has a value
#[derive(Debug, Clone)]
pub struct BoundArgs {
    function: String,
    values: IndexMap<String, Value>,
    extra_positional: Vec<Value>,
    extra_keywords: DictMap,
}

impl BoundArgs {
    /// Bound value of a declared parameter
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.values.get(name).ok_or_else(|| LessonError::Name(format!("{}.{}", self.function, name)))
    }

    /// `*args` as a tuple
    pub fn varargs(&self) -> Value {
        Value::tuple(self.extra_positional.iter().cloned())
    }

    /// `**kwargs` as a fresh dict
    pub fn varkw(&self) -> Value {
        Value::dict(self.extra_keywords.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    pub fn extra_positional(&self) -> &[Value] {
        &self.extra_positional
    }

    pub fn extra_keywords(&self) -> &DictMap {
        &self.extra_keywords
    }
}

type Body = dyn Fn(&BoundArgs) -> Result<Value>;

/// A callable value: signature, optional docstring and body
pub struct PyFunction {
    signature: Signature,
    doc: Option<String>,
    body: Box<Body>,
}

impl PyFunction {
    /// Define a function; fails if the parameter list is malformed
    pub fn new<F>(signature: Signature, body: F) -> Result<Self>
    where
        F: Fn(&BoundArgs) -> Result<Value> + 'static,
    {
        signature.validate()?;
        debug!(signature = %signature, "function defined");
        Ok(Self {
            signature,
            doc: None,
            body: Box::new(body),
        })
    }

    /// `lambda a, b: expr`
    pub fn lambda<F>(params: &[&str], body: F) -> Result<Self>
    where
        F: Fn(&BoundArgs) -> Result<Value> + 'static,
    {
        Self::new(Signature::lambda(params), body)
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn name(&self) -> &str {
        self.signature.name()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// `f.__doc__`
    pub fn doc(&self) -> Value {
        self.doc.as_deref().map_or(Value::None, Value::str)
    }

    pub fn call(&self, args: CallArgs) -> Result<Value> {
        let bound = self.signature.bind(args)?;
        (self.body)(&bound)
    }

    pub fn call1(&self, a: impl Into<Value>) -> Result<Value> {
        self.call(CallArgs::new().arg(a))
    }

    pub fn call2(&self, a: impl Into<Value>, b: impl Into<Value>) -> Result<Value> {
        self.call(CallArgs::new().arg(a).arg(b))
    }

    pub fn into_value(self) -> Value {
        Value::Function(Rc::new(self))
    }
}

impl fmt::Debug for PyFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.signature)
    }
}

/// Call whatever `callee` holds; non-functions raise TypeError
pub fn call_value(callee: &Value, args: CallArgs) -> Result<Value> {
    match callee {
        Value::Function(f) => f.call(args),
        other => Err(LessonError::type_error(format!(
            "'{}' object is not callable",
            other.type_name()
        ))),
    }
}
