//! Dynamic value representation
//!
//! Design: one tagged union for every value a lesson touches.
//! - Scalars (None, bool, int, float, str) are immutable and copied freely
//! - Lists and dicts live behind `Rc<RefCell<..>>` so two names can share one
//!   allocation, which is what identity (`is`) observes
//! - Dicts keep insertion order, like Python 3.7+

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::types::Type;
use crate::errors::{LessonError, Result};
use crate::runtime::function::PyFunction;

/// Insertion-ordered string-keyed mapping backing `dict` values
pub type DictMap = IndexMap<String, Value>;

#[derive(Clone)]
pub enum Value {
    /// The absent-value sentinel. There is exactly one, so `==` and `is` agree.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Value>>>),
    Tuple(Rc<[Value]>),
    Dict(Rc<RefCell<DictMap>>),
    Function(Rc<PyFunction>),
}

impl Value {
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Fresh list; each call is a distinct object
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    pub fn empty_list() -> Self {
        Value::list(Vec::new())
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect::<Vec<_>>().into())
    }

    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Dict(Rc::new(RefCell::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn empty_dict() -> Self {
        Value::dict(Vec::<(String, Value)>::new())
    }

    pub fn function(f: PyFunction) -> Self {
        Value::Function(Rc::new(f))
    }

    /// Runtime type, as `type(x)` would report it
    pub fn type_of(&self) -> Type {
        match self {
            Value::None => Type::None,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Str(_) => Type::Str,
            Value::List(_) => Type::List(Box::new(Type::Any)),
            Value::Tuple(_) => Type::Tuple(Vec::new()),
            Value::Dict(_) => Type::Dict(Box::new(Type::Str), Box::new(Type::Any)),
            Value::Function(_) => Type::Function(Vec::new(), Box::new(Type::Any)),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_of().class_name()
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Truth value in a boolean context.
    ///
    /// False: `None`, `False`, numeric zero, and empty str/list/tuple/dict.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::Dict(map) => !map.borrow().is_empty(),
            Value::Function(_) => true,
        }
    }

    /// Identity comparison (`is`).
    ///
    /// Containers and functions compare by allocation. Immutable scalars have
    /// no observable identity here, so they fall back to same-type equality;
    /// `None`, `True` and `False` are singletons either way.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Dict(a), Value::Dict(b)) => Rc::ptr_eq(a, b),
            (Value::Tuple(a), Value::Tuple(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    /// Numeric value widened to `f64` (bools count as 0/1)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// `len(x)`
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Str(s) => Ok(s.chars().count()),
            Value::List(items) => Ok(items.borrow().len()),
            Value::Tuple(items) => Ok(items.len()),
            Value::Dict(map) => Ok(map.borrow().len()),
            other => Err(LessonError::type_error(format!(
                "object of type '{}' has no len()",
                other.type_name()
            ))),
        }
    }

    /// `list.append(item)`
    pub fn append(&self, item: Value) -> Result<()> {
        match self {
            Value::List(items) => {
                items.borrow_mut().push(item);
                Ok(())
            }
            other => Err(LessonError::type_error(format!(
                "'{}' object has no attribute 'append'",
                other.type_name()
            ))),
        }
    }

    /// `d[key]` on a dict, or `seq[index]` on a list/tuple (negative indices count from the end)
    pub fn get_item(&self, key: &Value) -> Result<Value> {
        match (self, key) {
            (Value::Dict(map), Value::Str(k)) => map
                .borrow()
                .get(k.as_ref())
                .cloned()
                .ok_or_else(|| LessonError::value(format!("KeyError: '{}'", k))),
            (Value::List(_) | Value::Tuple(_), Value::Int(index)) => {
                let items = self.items()?;
                let len = items.len() as i64;
                let pos = if *index < 0 { len + index } else { *index };
                if pos < 0 || pos >= len {
                    return Err(LessonError::value(format!(
                        "IndexError: {} index out of range",
                        self.type_name()
                    )));
                }
                Ok(items[pos as usize].clone())
            }
            (container, key) => Err(LessonError::type_error(format!(
                "'{}' object is not subscriptable with {}",
                container.type_name(),
                key.type_name()
            ))),
        }
    }

    /// `d[key] = value` on a dict
    pub fn set_item(&self, key: impl Into<String>, value: Value) -> Result<()> {
        match self {
            Value::Dict(map) => {
                map.borrow_mut().insert(key.into(), value);
                Ok(())
            }
            other => Err(LessonError::type_error(format!(
                "'{}' object does not support item assignment",
                other.type_name()
            ))),
        }
    }

    /// Snapshot of the elements produced by iterating this value.
    ///
    /// Strings yield one-character strings, dicts yield their keys.
    pub fn items(&self) -> Result<Vec<Value>> {
        match self {
            Value::List(items) => Ok(items.borrow().clone()),
            Value::Tuple(items) => Ok(items.to_vec()),
            Value::Str(s) => Ok(s.chars().map(|c| Value::str(c.to_string())).collect()),
            Value::Dict(map) => Ok(map.borrow().keys().map(Value::str).collect()),
            other => Err(LessonError::type_error(format!(
                "'{}' object is not iterable",
                other.type_name()
            ))),
        }
    }

    /// `a, b = value`: destructure a sequence of exactly `N` elements
    pub fn unpack<const N: usize>(&self) -> Result<[Value; N]> {
        let items = self.items()?;
        let got = items.len();
        items.try_into().map_err(|_| {
            if got < N {
                LessonError::value(format!("not enough values to unpack (expected {}, got {})", N, got))
            } else {
                LessonError::value(format!("too many values to unpack (expected {})", N))
            }
        })
    }

    /// `dict.items()` as key/value pairs
    pub fn dict_entries(&self) -> Result<Vec<(String, Value)>> {
        match self {
            Value::Dict(map) => Ok(map.borrow().iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            other => Err(LessonError::type_error(format!(
                "'{}' object has no attribute 'items'",
                other.type_name()
            ))),
        }
    }

    /// `dict.values()`
    pub fn dict_values(&self) -> Result<Vec<Value>> {
        Ok(self.dict_entries()?.into_iter().map(|(_, v)| v).collect())
    }

    /// `repr(x)`: strings quoted, everything else as `str(x)`
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => quote_str(s),
            other => other.to_string(),
        }
    }
}

/// Python's `repr()` quoting: single quotes unless the text contains one
fn quote_str(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\n', "\\n");
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

/// Float text the way the interpreter prints it.
///
/// Shortest round-trip digits, a trailing `.0` for integral values and
/// exponent notation outside `[1e-4, 1e16)`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = f.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let text = format!("{:e}", f);
        return match text.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => text,
        };
    }

    if f == f.trunc() {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                let items = items.borrow();
                write!(f, "[{}]", items.iter().map(Value::repr).collect::<Vec<_>>().join(", "))
            }
            Value::Tuple(items) => match items.len() {
                1 => write!(f, "({},)", items[0].repr()),
                _ => write!(f, "({})", items.iter().map(Value::repr).collect::<Vec<_>>().join(", ")),
            },
            Value::Dict(map) => {
                let map = map.borrow();
                let body = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", quote_str(k), v.repr()))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{}}}", body)
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr())
    }
}

/// Value equality (`==`).
///
/// Numbers compare across int/float/bool, containers compare element-wise,
/// functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Tuple(a), Value::Tuple(b)) => a[..] == b[..],
            (Value::Dict(a), Value::Dict(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Int(a), Value::Int(b)) => a == b,
            (a, b) if a.type_of().is_numeric() && b.type_of().is_numeric() => {
                match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::str(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}
