use clap::Parser;
use std::path::PathBuf;

use crate::builtins::Console;
use crate::errors::Result;
use crate::infrastructure::{init_logging, LogConfig};
use crate::lessons::{lesson, print_cheatsheet, registry, LessonName};
use crate::logging::debug;
use crate::runner::DemoRunner;

use super::config::Config;

/// Side-by-side Python vs JavaScript/TypeScript syntax lessons
#[derive(Parser, Debug, Clone)]
#[command(name = "pyjs-lessons", version, about)]
pub struct Args {
    /// Lessons to run (default: all, in order)
    #[arg(value_enum)]
    pub lessons: Vec<LessonName>,

    /// Print lesson names and titles and exit
    #[arg(long)]
    pub list: bool,

    /// Print each selected lesson's Python vs JS/TS table instead of running it
    #[arg(long)]
    pub cheatsheet: bool,

    /// Print the JS/TS equivalent after each section
    #[arg(long)]
    pub show_js: bool,

    /// TOML config file (default: ./pyjs-lessons.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Raise the log level to debug
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command line flags merged over the config file
pub struct Cli {
    args: Args,
    config: Config,
}

impl Cli {
    pub fn new(args: Args, config: Config) -> Self {
        Self { args, config }
    }

    /// Resolve the config file named by `--config`, or the default one
    pub fn from_args(args: Args) -> Result<Self> {
        let config = Config::resolve(args.config.as_deref())?;
        Ok(Self::new(args, config))
    }

    /// Lessons named on the command line win over the config list
    pub fn selected(&self) -> Vec<LessonName> {
        if self.args.lessons.is_empty() {
            self.config.output.lessons.clone()
        } else {
            self.args.lessons.clone()
        }
    }

    pub fn show_js(&self) -> bool {
        self.args.show_js || self.config.output.show_js
    }

    pub fn log_config(&self) -> LogConfig {
        self.config.log_config(self.args.verbose)
    }

    pub fn run(&self, console: &mut Console) -> Result<()> {
        if self.args.list {
            return list(console);
        }

        let selected = self.selected();
        debug!(lessons = ?selected, show_js = self.show_js(), "selection resolved");

        if self.args.cheatsheet {
            for (i, &name) in selected.iter().enumerate() {
                if i > 0 {
                    console.blank()?;
                }
                print_cheatsheet(console, lesson(name))?;
            }
            return console.flush();
        }

        DemoRunner::new(selected).run(console)
    }
}

fn list(console: &mut Console) -> Result<()> {
    for lesson in registry() {
        console.print(format!("{:<13} {}", lesson.name(), lesson.title()))?;
    }
    console.flush()
}

/// Entry point for CLI binary
pub fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::from_args(Args::parse())?;
    // held until exit so buffered log lines are written
    let _guard = init_logging(cli.log_config());

    let mut console = Console::stdout().with_show_js(cli.show_js());
    cli.run(&mut console)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pyjs-lessons").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert!(args.lessons.is_empty());
        assert!(!args.list && !args.cheatsheet && !args.show_js && !args.verbose);
        assert!(args.config.is_none());

        let cli = Cli::new(args, Config::default());
        assert_eq!(cli.selected(), LessonName::ALL.to_vec());
        assert!(!cli.show_js());
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::parse("[output]\nshow_js = false\nlessons = [\"loops\"]").unwrap();
        let cli = Cli::new(parse(&["variables", "functions", "--show-js", "-v"]), config);
        assert_eq!(cli.selected(), vec![LessonName::Variables, LessonName::Functions]);
        assert!(cli.show_js());
        assert_eq!(cli.log_config().level, crate::logging::Level::DEBUG);
    }

    #[test]
    fn test_rejects_unknown_lesson() {
        assert!(Args::try_parse_from(["pyjs-lessons", "classes"]).is_err());
    }

    #[test]
    fn test_list_prints_every_lesson() {
        let (mut console, buffer) = Console::capture();
        Cli::new(parse(&["--list"]), Config::default()).run(&mut console).unwrap();
        let text = buffer.contents();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("loops "));
        assert!(text.lines().nth(3).unwrap().starts_with("variables "));
    }

    #[test]
    fn test_cheatsheet_replaces_transcript() {
        let (mut console, buffer) = Console::capture();
        Cli::new(parse(&["--cheatsheet", "conditionals"]), Config::default())
            .run(&mut console)
            .unwrap();
        let text = buffer.contents();
        assert!(text.contains("| Feature"));
        assert!(!text.contains("demo complete"));
    }
}
