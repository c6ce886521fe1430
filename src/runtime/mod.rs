//! Call, scope and dispatch semantics the lessons are written against

pub mod dispatch;
pub mod function;
pub mod scope;

pub use dispatch::{Branches, Match};
pub use function::{call_value, BoundArgs, CallArgs, Param, PyFunction, Signature};
pub use scope::{LocalScope, Namespace};
