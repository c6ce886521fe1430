//! Demo runner - executes the selected lessons strictly in order

use std::time::Instant;

use tracing::{info_span, instrument};

use crate::builtins::Console;
use crate::errors::Result;
use crate::lessons::{lesson, LessonName};
use crate::logging::{info, log_lesson_complete, log_lesson_failed, log_lesson_start};

pub struct DemoRunner {
    lessons: Vec<LessonName>,
}

impl DemoRunner {
    pub fn new(lessons: impl IntoIterator<Item = LessonName>) -> Self {
        Self {
            lessons: lessons.into_iter().collect(),
        }
    }

    /// All four lessons in their canonical order
    pub fn all() -> Self {
        Self::new(LessonName::ALL)
    }

    /// Run every selected lesson. The first error stops the run.
    #[instrument(skip(self, console), fields(lessons = self.lessons.len()))]
    pub fn run(&self, console: &mut Console) -> Result<()> {
        let start = Instant::now();
        for &name in &self.lessons {
            run_one(name, console)?;
        }
        console.flush()?;
        info!(duration_us = start.elapsed().as_micros() as u64, "run complete");
        Ok(())
    }
}

impl Default for DemoRunner {
    fn default() -> Self {
        Self::all()
    }
}

fn run_one(name: LessonName, console: &mut Console) -> Result<()> {
    let lesson = lesson(name);
    let _span = info_span!("lesson", name = name.as_str()).entered();
    log_lesson_start(name.as_str(), lesson.sections());

    let start = Instant::now();
    match lesson.run(console) {
        Ok(()) => {
            log_lesson_complete(name.as_str(), start.elapsed().as_micros() as u64);
            Ok(())
        }
        Err(err) => {
            log_lesson_failed(name.as_str(), err.kind(), &err.to_string());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_selection_in_given_order() {
        let (mut console, buffer) = Console::capture();
        DemoRunner::new([LessonName::Variables, LessonName::Loops])
            .run(&mut console)
            .unwrap();
        let text = buffer.contents();
        let vars = text.find("Variable demo output:").unwrap();
        let loops = text.find("for loop demo complete!").unwrap();
        assert!(vars < loops);
        assert!(!text.contains("Functions demo complete!"));
    }

    #[test]
    fn test_empty_selection_prints_nothing() {
        let (mut console, buffer) = Console::capture();
        DemoRunner::new(Vec::new()).run(&mut console).unwrap();
        assert!(buffer.contents().is_empty());
    }
}
