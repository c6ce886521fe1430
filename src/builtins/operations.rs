//! Polymorphic operations - type-generic arithmetic and comparison
//!
//! Design: dispatch on the operand tags with:
//! - Automatic type coercion (bool → int → float)
//! - Python semantics for mixed-type operations
//! - Floor division and modulo rounding toward negative infinity
//! - Fast path for the int/int case

use std::cmp::Ordering;

use crate::core::Value;
use crate::errors::{LessonError, Result};

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

fn unsupported(op: BinOp, a: &Value, b: &Value) -> LessonError {
    LessonError::type_error(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op.symbol(),
        a.type_name(),
        b.type_name()
    ))
}

/// Apply a binary operator
pub fn binary(op: BinOp, a: &Value, b: &Value) -> Result<Value> {
    match op {
        BinOp::Add => py_add(a, b),
        BinOp::Sub => py_sub(a, b),
        BinOp::Mul => py_mul(a, b),
        BinOp::Div => py_div(a, b),
        BinOp::FloorDiv => py_floordiv(a, b),
        BinOp::Mod => py_mod(a, b),
        BinOp::Pow => py_pow(a, b),
    }
}

/// Integer operands (bools widen to int)
fn int_pair(a: &Value, b: &Value) -> Option<(i64, i64)> {
    match (a, b) {
        (Value::Float(_), _) | (_, Value::Float(_)) => None,
        _ => Some((a.as_int()?, b.as_int()?)),
    }
}

fn float_pair(a: &Value, b: &Value) -> Option<(f64, f64)> {
    Some((a.as_f64()?, b.as_f64()?))
}

fn overflow(op: BinOp) -> LessonError {
    LessonError::value(format!("integer overflow in {}", op.symbol()))
}

/// Add two values (numbers, string concatenation, sequence concatenation)
pub fn py_add(a: &Value, b: &Value) -> Result<Value> {
    if let Some((x, y)) = int_pair(a, b) {
        return x.checked_add(y).map(Value::Int).ok_or_else(|| overflow(BinOp::Add));
    }
    if let Some((x, y)) = float_pair(a, b) {
        return Ok(Value::Float(x + y));
    }

    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(Value::str(format!("{}{}", x, y))),
        (Value::List(_), Value::List(_)) => {
            let mut items = a.items()?;
            items.extend(b.items()?);
            Ok(Value::list(items))
        }
        (Value::Tuple(_), Value::Tuple(_)) => {
            let mut items = a.items()?;
            items.extend(b.items()?);
            Ok(Value::tuple(items))
        }
        _ => Err(unsupported(BinOp::Add, a, b)),
    }
}

/// Subtract two numbers
pub fn py_sub(a: &Value, b: &Value) -> Result<Value> {
    if let Some((x, y)) = int_pair(a, b) {
        return x.checked_sub(y).map(Value::Int).ok_or_else(|| overflow(BinOp::Sub));
    }
    float_pair(a, b)
        .map(|(x, y)| Value::Float(x - y))
        .ok_or_else(|| unsupported(BinOp::Sub, a, b))
}

/// Multiply numbers, or repeat a string/list
pub fn py_mul(a: &Value, b: &Value) -> Result<Value> {
    if let Some((x, y)) = int_pair(a, b) {
        return x.checked_mul(y).map(Value::Int).ok_or_else(|| overflow(BinOp::Mul));
    }
    if let Some((x, y)) = float_pair(a, b) {
        return Ok(Value::Float(x * y));
    }

    match (a, b) {
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            Ok(Value::str(s.repeat((*n).max(0) as usize)))
        }
        (Value::List(_), Value::Int(n)) | (Value::Int(n), Value::List(_)) => {
            let base = if matches!(a, Value::List(_)) { a.items()? } else { b.items()? };
            let count = (*n).max(0) as usize;
            let mut items = Vec::with_capacity(base.len() * count);
            for _ in 0..count {
                items.extend(base.iter().cloned());
            }
            Ok(Value::list(items))
        }
        _ => Err(unsupported(BinOp::Mul, a, b)),
    }
}

/// True division, always a float
pub fn py_div(a: &Value, b: &Value) -> Result<Value> {
    let (x, y) = float_pair(a, b).ok_or_else(|| unsupported(BinOp::Div, a, b))?;
    if y == 0.0 {
        return Err(LessonError::ZeroDivision("division by zero".to_string()));
    }
    Ok(Value::Float(x / y))
}

/// Integer quotient rounded toward negative infinity
fn floor_div_i64(x: i64, y: i64) -> Option<i64> {
    let q = x.checked_div(y)?;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Floor division (`//`)
pub fn py_floordiv(a: &Value, b: &Value) -> Result<Value> {
    if let Some((x, y)) = int_pair(a, b) {
        if y == 0 {
            return Err(LessonError::ZeroDivision("integer division or modulo by zero".to_string()));
        }
        return floor_div_i64(x, y).map(Value::Int).ok_or_else(|| overflow(BinOp::FloorDiv));
    }

    let (x, y) = float_pair(a, b).ok_or_else(|| unsupported(BinOp::FloorDiv, a, b))?;
    if y == 0.0 {
        return Err(LessonError::ZeroDivision("float floor division by zero".to_string()));
    }
    Ok(Value::Float((x / y).floor()))
}

/// Modulo (`%`); the result takes the sign of the divisor
pub fn py_mod(a: &Value, b: &Value) -> Result<Value> {
    if let Some((x, y)) = int_pair(a, b) {
        if y == 0 {
            return Err(LessonError::ZeroDivision("integer division or modulo by zero".to_string()));
        }
        // i64::MIN % -1 is the only overflowing case and its remainder is 0
        let r = x.checked_rem(y).unwrap_or(0);
        return Ok(Value::Int(if r != 0 && ((r < 0) != (y < 0)) { r + y } else { r }));
    }

    let (x, y) = float_pair(a, b).ok_or_else(|| unsupported(BinOp::Mod, a, b))?;
    if y == 0.0 {
        return Err(LessonError::ZeroDivision("float modulo".to_string()));
    }
    let r = x % y;
    Ok(Value::Float(if r != 0.0 && ((r < 0.0) != (y < 0.0)) { r + y } else { r }))
}

/// Exponentiation (`**`); int for non-negative int exponents, float otherwise
pub fn py_pow(a: &Value, b: &Value) -> Result<Value> {
    if let Some((x, y)) = int_pair(a, b) {
        if y >= 0 {
            let exp = u32::try_from(y).map_err(|_| overflow(BinOp::Pow))?;
            return x.checked_pow(exp).map(Value::Int).ok_or_else(|| overflow(BinOp::Pow));
        }
        if x == 0 {
            return Err(LessonError::ZeroDivision(
                "0.0 cannot be raised to a negative power".to_string(),
            ));
        }
    }

    float_pair(a, b)
        .map(|(x, y)| Value::Float(x.powf(y)))
        .ok_or_else(|| unsupported(BinOp::Pow, a, b))
}

/// Ordering between two values; only numbers with numbers and strings with strings
pub fn py_cmp(a: &Value, b: &Value) -> Result<Ordering> {
    if let Some((x, y)) = int_pair(a, b) {
        return Ok(x.cmp(&y));
    }
    if let Some((x, y)) = float_pair(a, b) {
        return x
            .partial_cmp(&y)
            .ok_or_else(|| LessonError::value("comparison with nan is unordered"));
    }

    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        _ => Err(LessonError::type_error(format!(
            "'<' not supported between instances of '{}' and '{}'",
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// Apply a comparison operator
pub fn compare(op: CmpOp, a: &Value, b: &Value) -> Result<bool> {
    match op {
        CmpOp::Eq => Ok(a == b),
        CmpOp::Ne => Ok(a != b),
        CmpOp::Lt => Ok(py_cmp(a, b)? == Ordering::Less),
        CmpOp::Le => Ok(py_cmp(a, b)? != Ordering::Greater),
        CmpOp::Gt => Ok(py_cmp(a, b)? == Ordering::Greater),
        CmpOp::Ge => Ok(py_cmp(a, b)? != Ordering::Less),
    }
}

/// Chained comparison: `first op1 v1 op2 v2 ...`
///
/// Same as `first op1 v1 and v1 op2 v2 and ...`; stops at the first false link.
pub fn compare_chain(first: &Value, links: &[(CmpOp, Value)]) -> Result<bool> {
    let mut left = first;
    for (op, right) in links {
        if !compare(*op, left, right)? {
            return Ok(false);
        }
        left = right;
    }
    Ok(true)
}

/// Membership test (`item in container`)
///
/// Sequences compare elements by value, strings test for a substring and
/// dicts test their keys.
pub fn contains(container: &Value, item: &Value) -> Result<bool> {
    match (container, item) {
        (Value::Str(haystack), Value::Str(needle)) => Ok(haystack.contains(needle.as_ref())),
        (Value::Str(_), other) => Err(LessonError::type_error(format!(
            "'in <string>' requires string as left operand, not {}",
            other.type_name()
        ))),
        (Value::Dict(map), Value::Str(key)) => Ok(map.borrow().contains_key(key.as_ref())),
        (Value::Dict(_), _) => Ok(false),
        (Value::List(_) | Value::Tuple(_), _) => Ok(container.items()?.iter().any(|v| v == item)),
        (other, _) => Err(LessonError::type_error(format!(
            "argument of type '{}' is not iterable",
            other.type_name()
        ))),
    }
}

/// `a and b`: returns `a` if it is falsy, otherwise evaluates and returns `b`
pub fn py_and(a: Value, b: impl FnOnce() -> Value) -> Value {
    if a.is_truthy() {
        b()
    } else {
        a
    }
}

/// `a or b`: returns `a` if it is truthy, otherwise evaluates and returns `b`
pub fn py_or(a: Value, b: impl FnOnce() -> Value) -> Value {
    if a.is_truthy() {
        a
    } else {
        b()
    }
}

/// `not a`
pub fn py_not(a: &Value) -> Value {
    Value::Bool(!a.is_truthy())
}

/// `a if cond else b`; only the chosen branch is evaluated
pub fn ternary<T>(cond: &Value, then: impl FnOnce() -> T, otherwise: impl FnOnce() -> T) -> T {
    if cond.is_truthy() {
        then()
    } else {
        otherwise()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Value {
        Value::Int(v)
    }

    #[test]
    fn test_int_arithmetic() {
        let a = int(10);
        let b = int(3);

        assert_eq!(py_add(&a, &b).unwrap(), int(13));
        assert_eq!(py_sub(&a, &b).unwrap(), int(7));
        assert_eq!(py_mul(&a, &b).unwrap(), int(30));
        assert_eq!(py_floordiv(&a, &b).unwrap(), int(3));
        assert_eq!(py_mod(&a, &b).unwrap(), int(1));
        assert_eq!(py_pow(&a, &b).unwrap(), int(1000));
        assert_eq!(py_div(&a, &b).unwrap().to_string(), "3.3333333333333335");
    }

    #[test]
    fn test_floor_semantics() {
        assert_eq!(py_floordiv(&int(-7), &int(2)).unwrap(), int(-4));
        assert_eq!(py_mod(&int(-7), &int(2)).unwrap(), int(1));
        assert_eq!(py_floordiv(&int(7), &int(-2)).unwrap(), int(-4));
        assert_eq!(py_mod(&int(7), &int(-2)).unwrap(), int(-1));
        assert_eq!(py_mod(&Value::Float(-7.5), &int(2)).unwrap(), Value::Float(0.5));
        assert_eq!(py_floordiv(&Value::Float(7.5), &int(2)).unwrap(), Value::Float(3.0));
    }

    #[test]
    fn test_mod_near_i64_bounds() {
        assert_eq!(py_mod(&int(i64::MIN), &int(3)).unwrap(), int(1));
        assert_eq!(py_mod(&int(i64::MAX), &int(-2)).unwrap(), int(-1));
        assert_eq!(py_mod(&int(i64::MIN), &int(-1)).unwrap(), int(0));
        assert_eq!(py_mod(&int(i64::MAX), &int(i64::MIN)).unwrap(), int(-1));
    }

    #[test]
    fn test_mixed_arithmetic() {
        let i = int(5);
        let f = Value::Float(2.5);

        assert_eq!(py_add(&i, &f).unwrap(), Value::Float(7.5));
        assert_eq!(py_mul(&i, &f).unwrap(), Value::Float(12.5));
        assert_eq!(py_add(&Value::Bool(true), &int(1)).unwrap(), int(2));
        assert_eq!(py_pow(&int(2), &int(-1)).unwrap(), Value::Float(0.5));
    }

    #[test]
    fn test_zero_division() {
        assert!(matches!(py_div(&int(1), &int(0)), Err(LessonError::ZeroDivision(_))));
        assert!(matches!(py_floordiv(&int(1), &int(0)), Err(LessonError::ZeroDivision(_))));
        assert!(matches!(py_mod(&int(1), &int(0)), Err(LessonError::ZeroDivision(_))));
    }

    #[test]
    fn test_string_ops() {
        let s = py_add(&Value::str("Zhang"), &Value::str("San")).unwrap();
        assert_eq!(s, Value::str("ZhangSan"));
        assert_eq!(py_mul(&Value::str("="), &int(3)).unwrap(), Value::str("==="));
        assert!(matches!(py_sub(&Value::str("a"), &int(1)), Err(LessonError::Type(_))));
        assert!(matches!(py_add(&Value::str("a"), &int(1)), Err(LessonError::Type(_))));
    }

    #[test]
    fn test_comparisons() {
        let a = int(5);
        let b = int(10);
        let c = int(5);

        assert!(compare(CmpOp::Lt, &a, &b).unwrap());
        assert!(compare(CmpOp::Le, &a, &c).unwrap());
        assert!(compare(CmpOp::Eq, &a, &c).unwrap());
        assert!(compare(CmpOp::Ne, &a, &b).unwrap());
        assert!(compare(CmpOp::Gt, &b, &a).unwrap());
        assert!(compare(CmpOp::Ge, &b, &a).unwrap());
        assert!(compare(CmpOp::Lt, &Value::str("a"), &int(1)).is_err());
    }

    #[test]
    fn test_chained_comparison() {
        let x = int(15);
        assert!(compare_chain(&int(10), &[(CmpOp::Le, x.clone()), (CmpOp::Le, int(20))]).unwrap());
        assert!(!compare_chain(&int(0), &[(CmpOp::Lt, x.clone()), (CmpOp::Lt, int(10))]).unwrap());
        // short-circuits before the unorderable link
        assert!(!compare_chain(&int(20), &[(CmpOp::Lt, x), (CmpOp::Lt, Value::str("z"))]).unwrap());
    }

    #[test]
    fn test_membership() {
        let fruits = Value::list(vec!["apple".into(), "banana".into()]);
        assert!(contains(&fruits, &Value::str("apple")).unwrap());
        assert!(!contains(&fruits, &Value::str("melon")).unwrap());
        assert!(contains(&Value::str("Hello Python"), &Value::str("Python")).unwrap());
        assert!(contains(&Value::str("abc"), &int(1)).is_err());
        assert!(contains(&int(1), &int(1)).is_err());
    }

    #[test]
    fn test_short_circuit() {
        let mut evaluated = false;
        let result = py_and(Value::Int(0), || {
            evaluated = true;
            Value::Int(1)
        });
        assert_eq!(result, Value::Int(0));
        assert!(!evaluated);

        assert_eq!(py_or(Value::str(""), || Value::str("default")), Value::str("default"));
        assert_eq!(py_or(Value::str("x"), || Value::None), Value::str("x"));
        assert_eq!(py_not(&Value::None), Value::Bool(true));
    }
}
