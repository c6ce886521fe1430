//! Process-level infrastructure

pub mod logging;

pub use logging::{init_logging, parse_level, LogConfig, LogFormat, LogOutput};
