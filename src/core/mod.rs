//! Core value model
//!
//! This module contains the dynamic value representation and the runtime
//! type tags every lesson computation is expressed in.

pub mod types;
pub mod value;

pub use types::Type;
pub use value::{format_float, DictMap, Value};
