//! Built-in functions - the subset of Python builtins the lessons exercise
//!
//! Design: plain Rust functions over [`Value`](crate::core::Value), each
//! concern in a focused module. Fallible builtins return
//! [`Result`](crate::errors::Result) carrying the Python error class.

mod convert;
mod iter;
mod operations;
mod print;

#[cfg(test)]
mod tests;

pub use convert::{to_bool, to_float, to_int, to_str};
pub use iter::{
    all, any, comprehend, enumerate, for_else, for_loop, py_filter, py_map, range, range_from, range_step,
    reverse_slice, reversed, sort_list, sorted, zip, Flow, LoopExit, Range,
};
pub use operations::{
    binary, compare, compare_chain, contains, py_add, py_and, py_cmp, py_div, py_floordiv, py_mod, py_mul,
    py_not, py_or, py_pow, py_sub, ternary, BinOp, CmpOp,
};
pub use print::{fixed, format_positional, CaptureBuffer, Console, Output, StdoutOutput};

use crate::core::Value;

/// `type(x)` as printed: `<class 'int'>`
pub fn type_of(value: &Value) -> String {
    value.type_of().class_repr()
}

/// `len(x)`
pub fn len(value: &Value) -> crate::errors::Result<usize> {
    value.len()
}
