//! Error taxonomy for the lesson runtime
//!
//! Every fallible runtime operation returns [`Result`]. Messages follow the
//! wording the Python interpreter uses for the same failure so a reader can
//! line them up with what the lesson is teaching.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for runtime and lesson operations.
pub type Result<T> = std::result::Result<T, LessonError>;

/// Errors raised while evaluating a lesson.
#[derive(Error, Debug)]
pub enum LessonError {
    /// Invalid type coercion, e.g. `int("abc")`
    #[error("ConversionError: {0}")]
    Conversion(String),

    /// Call binding failure: missing, duplicate or unexpected argument
    #[error("ArgumentError: {function}() {reason}")]
    Argument { function: String, reason: String },

    /// Invalid argument value, e.g. `range(0, 10, 0)`
    #[error("ValueError: {0}")]
    Value(String),

    /// Division or modulo by zero
    #[error("ZeroDivisionError: {0}")]
    ZeroDivision(String),

    /// Unsupported operand types, calling a non-callable
    #[error("TypeError: {0}")]
    Type(String),

    /// Name lookup failed in every visible scope
    #[error("NameError: name '{0}' is not defined")]
    Name(String),

    /// Configuration file could not be read or parsed
    #[error("failed to load config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// Console write failure
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl LessonError {
    pub fn argument(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Argument {
            function: function.into(),
            reason: reason.into(),
        }
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    pub fn value(msg: impl Into<String>) -> Self {
        Self::Value(msg.into())
    }

    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::Type(msg.into())
    }

    /// Short Python-style class name of the error
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Conversion(_) => "ConversionError",
            Self::Argument { .. } => "ArgumentError",
            Self::Value(_) => "ValueError",
            Self::ZeroDivision(_) => "ZeroDivisionError",
            Self::Type(_) => "TypeError",
            Self::Name(_) => "NameError",
            Self::Config { .. } => "ConfigError",
            Self::Io(_) => "IOError",
        }
    }
}
