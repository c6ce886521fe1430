//! Logging utilities for the lesson runtime
//!
//! Re-exports the `tracing` macros so modules write `use crate::logging::debug`,
//! plus a few structured events with stable targets.

pub use tracing::{debug, error, info, trace, warn, Level};

/// Log the start of a lesson
#[inline]
pub fn log_lesson_start(name: &str, sections: usize) {
    info!(target: "lesson", lesson = name, sections, "starting lesson");
}

/// Log a lesson finishing
#[inline]
pub fn log_lesson_complete(name: &str, duration_us: u64) {
    info!(target: "lesson", lesson = name, duration_us, "lesson complete");
}

/// Log one section header
#[inline]
pub fn log_section(lesson: &str, title: &str) {
    debug!(target: "lesson", lesson, title, "section");
}

/// Log a lesson that stopped with an error
#[inline]
pub fn log_lesson_failed(name: &str, kind: &str, message: &str) {
    error!(target: "lesson", lesson = name, kind, message, "lesson failed");
}
