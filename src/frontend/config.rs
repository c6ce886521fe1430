use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{LessonError, Result};
use crate::infrastructure::{parse_level, LogConfig, LogFormat, LogOutput};
use crate::lessons::LessonName;
use crate::logging::{debug, warn, Level};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "pyjs-lessons.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Directory for a daily-rolling log file; stderr when unset
    #[serde(default)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_false")]
    pub show_js: bool,

    #[serde(default = "default_lessons")]
    pub lessons: Vec<LessonName>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_js: false,
            lessons: default_lessons(),
        }
    }
}

fn default_level() -> String { "warn".to_string() }
fn default_false() -> bool { false }
fn default_lessons() -> Vec<LessonName> { LessonName::ALL.to_vec() }

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LessonError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::parse(&content).map_err(|reason| LessonError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.message().to_string())?;
        if parse_level(&config.logging.level).is_none() {
            return Err(format!("unknown log level '{}'", config.logging.level));
        }
        Ok(config)
    }

    /// An explicit path must exist; otherwise fall back to the default file, then to defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    debug!(path = %path.display(), "using default config file");
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Subscriber settings; `verbose` raises the level to at least debug
    pub fn log_config(&self, verbose: bool) -> LogConfig {
        let mut level = parse_level(&self.logging.level).unwrap_or_else(|| {
            warn!(level = %self.logging.level, "unknown log level, using warn");
            Level::WARN
        });
        if verbose && level < Level::DEBUG {
            level = Level::DEBUG;
        }

        let output = match &self.logging.file {
            Some(directory) => LogOutput::File {
                directory: directory.clone(),
                prefix: "pyjs-lessons.log".to_string(),
            },
            None => LogOutput::Stderr,
        };

        LogConfig::new()
            .with_level(level)
            .with_format(self.logging.format)
            .with_output(output)
            .with_span_events(verbose)
    }
}
