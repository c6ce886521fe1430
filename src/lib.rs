//! Python vs JavaScript/TypeScript syntax lessons
//!
//! Every value a lesson prints is computed by a small Python-semantics
//! runtime (dynamic values, argument binding, scopes, dispatch) rather than
//! written out by hand.

// Core modules
pub mod builtins;
pub mod core;
pub mod errors;
pub mod frontend;
pub mod infrastructure;
pub mod lessons;
pub mod logging;
pub mod runner;
pub mod runtime;

// Re-export commonly used items
pub use crate::builtins::Console;
pub use crate::core::{Type, Value};
pub use errors::{LessonError, Result};
pub use frontend::{cli_main, Config};
pub use lessons::{lesson, registry, Lesson, LessonName};
pub use runner::DemoRunner;
pub use runtime::{CallArgs, PyFunction, Signature};
