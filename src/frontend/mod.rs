//! Frontend components
//!
//! The command line and configuration file that form the user-facing
//! interface of pyjs-lessons.

pub mod cli;
pub mod config;

pub use cli::{main as cli_main, Args, Cli};
pub use config::{Config, LoggingConfig, OutputConfig, DEFAULT_CONFIG_FILE};
