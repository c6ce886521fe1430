//! Iterator support - range, enumerate, zip, reversed and loop helpers
//!
//! Design: zero-cost wrappers over Rust's iterator protocol. `Range` keeps the
//! half-open stepping rules of Python's `range()`, including descending
//! ranges and the empty-range edge cases.

use std::cmp::Ordering;

use super::operations::py_cmp;
use crate::core::Value;
use crate::errors::{LessonError, Result};
use crate::logging::trace;
use crate::runtime::{call_value, CallArgs};

/// Range iterator - Python's range() equivalent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    current: i64,
    end: i64,
    step: i64,
}

impl Range {
    /// Create new range; `step` must be nonzero
    pub fn new(start: i64, end: i64, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(LessonError::value("range() arg 3 must not be zero"));
        }
        Ok(Self { current: start, end, step })
    }

    /// Check if range is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        (self.step > 0 && self.current >= self.end) || (self.step < 0 && self.current <= self.end)
    }

    /// Get remaining elements count
    #[inline]
    pub const fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }

        // ceil(|end - current| / |step|)
        let span = (self.end as i128 - self.current as i128).unsigned_abs();
        let step = (self.step as i128).unsigned_abs();
        ((span + step - 1) / step) as usize
    }

    pub const fn step(&self) -> i64 {
        self.step
    }
}

impl Iterator for Range {
    type Item = i64;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if Range::is_empty(self) {
            return None;
        }

        let val = self.current;
        match self.current.checked_add(self.step) {
            Some(next) => self.current = next,
            // stepping past i64 bounds means we are past `end` too
            None => self.current = self.end,
        }
        Some(val)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = Range::len(self);
        (len, Some(len))
    }
}

impl ExactSizeIterator for Range {
    #[inline]
    fn len(&self) -> usize {
        Range::len(self)
    }
}

impl DoubleEndedIterator for Range {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let len = Range::len(self);
        if len == 0 {
            return None;
        }

        // the span can exceed i64::MAX even though the last element fits
        let last = (self.current as i128 + (len as i128 - 1) * self.step as i128) as i64;
        // pull the exclusive end in to the element we are returning
        self.end = last;
        Some(last)
    }
}

/// `range(stop)`
#[inline]
pub fn range(stop: i64) -> Range {
    Range { current: 0, end: stop, step: 1 }
}

/// `range(start, stop)`
#[inline]
pub fn range_from(start: i64, stop: i64) -> Range {
    Range { current: start, end: stop, step: 1 }
}

/// `range(start, stop, step)`, failing with ValueError when `step == 0`
#[inline]
pub fn range_step(start: i64, stop: i64, step: i64) -> Result<Range> {
    Range::new(start, stop, step)
}

/// `enumerate(items, start=...)`
pub fn enumerate<I>(items: I, start: i64) -> impl Iterator<Item = (i64, I::Item)>
where
    I: IntoIterator,
{
    (start..).zip(items)
}

/// `zip(a, b)`: stops at the shorter input
pub fn zip<A, B>(a: A, b: B) -> impl Iterator<Item = (A::Item, B::Item)>
where
    A: IntoIterator,
    B: IntoIterator,
{
    a.into_iter().zip(b)
}

/// `reversed(seq)`
pub fn reversed(seq: &Value) -> Result<Vec<Value>> {
    let mut items = seq.items()?;
    items.reverse();
    Ok(items)
}

/// `seq[::-1]`: a new sequence of the same kind, reversed
pub fn reverse_slice(seq: &Value) -> Result<Value> {
    match seq {
        Value::Str(s) => Ok(Value::str(s.chars().rev().collect::<String>())),
        Value::Tuple(_) => Ok(Value::tuple(reversed(seq)?)),
        Value::List(_) => Ok(Value::list(reversed(seq)?)),
        other => Err(LessonError::type_error(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

/// What a loop body asks for after one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Go on with the next element (`continue`, or falling off the body)
    Next,
    /// Leave the loop (`break`)
    Break,
}

/// How a loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Ran out of elements
    Completed,
    /// Left through `Flow::Break`
    Broken,
}

impl LoopExit {
    pub fn broke(self) -> bool {
        self == LoopExit::Broken
    }

    /// The loop's `else:` block: runs `on_complete` only if nothing broke out.
    /// Returns `true` if the loop was broken out of.
    pub fn otherwise<E>(self, on_complete: E) -> Result<bool>
    where
        E: FnOnce() -> Result<()>,
    {
        if !self.broke() {
            on_complete()?;
        }
        Ok(self.broke())
    }
}

/// `for item in items: body`, recording whether the body broke out
pub fn for_loop<I, B>(items: I, mut body: B) -> Result<LoopExit>
where
    I: IntoIterator,
    B: FnMut(I::Item) -> Result<Flow>,
{
    let mut exit = LoopExit::Completed;
    for item in items {
        if body(item)? == Flow::Break {
            exit = LoopExit::Broken;
            break;
        }
    }

    trace!(broke = exit.broke(), "loop finished");
    Ok(exit)
}

/// `for item in items: body / else: on_complete`
///
/// `on_complete` runs only when the loop ran out of elements without a
/// `Break`. Returns `true` if the loop was broken out of.
pub fn for_else<I, B, E>(items: I, body: B, on_complete: E) -> Result<bool>
where
    I: IntoIterator,
    B: FnMut(I::Item) -> Result<Flow>,
    E: FnOnce() -> Result<()>,
{
    for_loop(items, body)?.otherwise(on_complete)
}

/// `[map(x) for x in items if keep(x)]` in a single pass
pub fn comprehend<I, M, T>(
    items: I,
    mut map: M,
    mut keep: Option<&mut dyn FnMut(&I::Item) -> Result<bool>>,
) -> Result<Vec<T>>
where
    I: IntoIterator,
    M: FnMut(I::Item) -> Result<T>,
{
    let mut out = Vec::new();
    for item in items {
        if let Some(keep) = keep.as_mut() {
            if !keep(&item)? {
                continue;
            }
        }
        out.push(map(item)?);
    }
    Ok(out)
}

/// `all(pred(x) for x in items)`, short-circuiting on the first failure
pub fn all<I, P>(items: I, mut pred: P) -> Result<bool>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> Result<bool>,
{
    for item in items {
        if !pred(&item)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `any(pred(x) for x in items)`, short-circuiting on the first success
pub fn any<I, P>(items: I, mut pred: P) -> Result<bool>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> Result<bool>,
{
    for item in items {
        if pred(&item)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// `list(map(func, items))` with a callable value
pub fn py_map(func: &Value, items: Vec<Value>) -> Result<Vec<Value>> {
    items
        .into_iter()
        .map(|item| call_value(func, CallArgs::positional([item])))
        .collect()
}

/// `list(filter(func, items))`: keeps items whose result is truthy
pub fn py_filter(func: &Value, items: Vec<Value>) -> Result<Vec<Value>> {
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        if call_value(func, CallArgs::positional([item.clone()]))?.is_truthy() {
            kept.push(item);
        }
    }
    Ok(kept)
}

/// `sorted(items, key=key)`: stable, ascending by the computed key
pub fn sorted<K>(items: Vec<Value>, mut key: K) -> Result<Vec<Value>>
where
    K: FnMut(&Value) -> Result<Value>,
{
    let mut decorated = items
        .into_iter()
        .map(|item| -> Result<(Value, Value)> { Ok((key(&item)?, item)) })
        .collect::<Result<Vec<_>>>()?;

    // sort_by cannot fail, so remember the first unorderable pair
    let mut failure = None;
    decorated.sort_by(|a, b| match py_cmp(&a.0, &b.0) {
        Ok(ordering) => ordering,
        Err(e) => {
            failure.get_or_insert(e);
            Ordering::Equal
        }
    });
    if let Some(e) = failure {
        return Err(e);
    }

    Ok(decorated.into_iter().map(|(_, item)| item).collect())
}

/// `list.sort(key=key)`, in place
pub fn sort_list<K>(list: &Value, key: K) -> Result<()>
where
    K: FnMut(&Value) -> Result<Value>,
{
    match list {
        Value::List(items) => {
            let snapshot = items.borrow().clone();
            let ordered = sorted(snapshot, key)?;
            *items.borrow_mut() = ordered;
            Ok(())
        }
        other => Err(LessonError::type_error(format!(
            "'{}' object has no attribute 'sort'",
            other.type_name()
        ))),
    }
}
