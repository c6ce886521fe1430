//! Lessons - one module per Python topic
//!
//! Each lesson is a fixed sequence of sections. A section prints a framed
//! title, evaluates its examples through the runtime and prints the labelled
//! results, then (optionally) the JS/TS equivalent.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::builtins::Console;
use crate::errors::Result;
use crate::logging::log_section;

mod conditionals;
mod functions;
mod loops;
mod variables;

pub use conditionals::Conditionals;
pub use functions::Functions;
pub use loops::Loops;
pub use variables::Variables;

/// Lesson identifiers, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LessonName {
    Loops,
    Functions,
    Conditionals,
    Variables,
}

impl LessonName {
    pub const ALL: [LessonName; 4] = [
        LessonName::Loops,
        LessonName::Functions,
        LessonName::Conditionals,
        LessonName::Variables,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LessonName::Loops => "loops",
            LessonName::Functions => "functions",
            LessonName::Conditionals => "conditionals",
            LessonName::Variables => "variables",
        }
    }
}

impl fmt::Display for LessonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One line of a lesson's Python vs JS/TS comparison table
#[derive(Debug, Clone, Copy)]
pub struct CheatRow {
    pub feature: &'static str,
    pub python: &'static str,
    pub js: &'static str,
}

const fn row(feature: &'static str, python: &'static str, js: &'static str) -> CheatRow {
    CheatRow { feature, python, js }
}

pub trait Lesson: Send + Sync {
    fn name(&self) -> LessonName;

    /// One-line description shown by `--list`
    fn title(&self) -> &'static str;

    /// Width of the `=` rule framing every header
    fn separator_width(&self) -> usize {
        60
    }

    fn sections(&self) -> usize;

    fn cheatsheet(&self) -> &'static [CheatRow];

    /// Print the full transcript of this lesson
    fn run(&self, console: &mut Console) -> Result<()>;
}

static REGISTRY: Lazy<Vec<Box<dyn Lesson>>> = Lazy::new(|| {
    let lessons: [Box<dyn Lesson>; 4] = [
        Box::new(Loops),
        Box::new(Functions),
        Box::new(Conditionals),
        Box::new(Variables),
    ];
    lessons.into()
});

/// All lessons in run order
pub fn registry() -> &'static [Box<dyn Lesson>] {
    &REGISTRY
}

pub fn lesson(name: LessonName) -> &'static dyn Lesson {
    // registry order matches `LessonName::ALL`
    REGISTRY[name as usize].as_ref()
}

/// Framed section title
pub(crate) fn section(console: &mut Console, lesson: LessonName, width: usize, title: &str) -> Result<()> {
    log_section(lesson.as_str(), title);
    console.header(width, title)
}

/// Closing banner printed after the last section
pub(crate) fn closing(console: &mut Console, width: usize, text: &str) -> Result<()> {
    console.separator(width)?;
    console.print(text)?;
    console.separator(width)
}

/// Lines printed from inside a function body, replayed onto the console
/// once the call returns
#[derive(Clone, Default)]
pub(crate) struct Printed(Rc<RefCell<Vec<String>>>);

impl Printed {
    pub(crate) fn say(&self, line: impl Into<String>) {
        self.0.borrow_mut().push(line.into());
    }

    pub(crate) fn flush_to(&self, console: &mut Console) -> Result<()> {
        for line in self.0.borrow_mut().drain(..) {
            console.print(line)?;
        }
        Ok(())
    }
}

/// Render a lesson's comparison table
pub fn print_cheatsheet(console: &mut Console, lesson: &dyn Lesson) -> Result<()> {
    let rows = lesson.cheatsheet();
    let header = row("Feature", "Python", "JS/TS");
    let widths = rows.iter().chain(std::iter::once(&header)).fold((0, 0, 0), |(f, p, j), r| {
        (
            f.max(r.feature.chars().count()),
            p.max(r.python.chars().count()),
            j.max(r.js.chars().count()),
        )
    });

    let rule = format!(
        "+-{}-+-{}-+-{}-+",
        "-".repeat(widths.0),
        "-".repeat(widths.1),
        "-".repeat(widths.2)
    );
    let line = |r: &CheatRow| {
        format!(
            "| {:<fw$} | {:<pw$} | {:<jw$} |",
            r.feature,
            r.python,
            r.js,
            fw = widths.0,
            pw = widths.1,
            jw = widths.2
        )
    };

    console.print(format!("{} ({})", lesson.title(), lesson.name()))?;
    console.print(&rule)?;
    console.print(line(&header))?;
    console.print(&rule)?;
    for r in rows {
        console.print(line(r))?;
    }
    console.print(&rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let names: Vec<_> = registry().iter().map(|l| l.name()).collect();
        assert_eq!(names, LessonName::ALL.to_vec());
        for name in LessonName::ALL {
            assert_eq!(lesson(name).name(), name);
        }
    }

    #[test]
    fn test_separator_widths() {
        assert_eq!(lesson(LessonName::Loops).separator_width(), 60);
        assert_eq!(lesson(LessonName::Functions).separator_width(), 60);
        assert_eq!(lesson(LessonName::Conditionals).separator_width(), 60);
        assert_eq!(lesson(LessonName::Variables).separator_width(), 50);
    }

    #[test]
    fn test_cheatsheet_table_is_aligned() {
        let (mut console, buffer) = Console::capture();
        print_cheatsheet(&mut console, lesson(LessonName::Loops)).unwrap();
        let text = buffer.contents();
        let table: Vec<&str> = text.lines().skip(1).collect();
        let width = table[0].chars().count();
        assert!(table.iter().all(|l| l.chars().count() == width));
        assert!(text.contains("enumerate()"));
    }
}
