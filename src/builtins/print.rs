//! Output operations - print() and console framing
//!
//! Design: lessons write through an `Output` target so the binary can stream
//! to stdout while tests capture the exact transcript in memory.

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;

use crate::core::Value;
use crate::errors::{LessonError, Result};
use crate::logging::trace;

/// Output target abstraction
pub trait Output {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    #[inline]
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bytes(s.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Process stdout
pub struct StdoutOutput {
    inner: io::Stdout,
}

impl Output for StdoutOutput {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.lock().write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.lock().flush()
    }
}

/// In-memory transcript; clones share one buffer
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

impl Output for CaptureBuffer {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.bytes.borrow_mut().extend_from_slice(bytes);
        Ok(())
    }
}

/// Line-oriented console used by every lesson
pub struct Console {
    out: Box<dyn Output>,
    show_js: bool,
}

impl Console {
    pub fn new(out: Box<dyn Output>) -> Self {
        Self { out, show_js: false }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(StdoutOutput { inner: io::stdout() }))
    }

    /// Console writing into a fresh capture buffer, plus a handle to read it back
    pub fn capture() -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::new();
        (Self::new(Box::new(buffer.clone())), buffer)
    }

    pub fn with_show_js(mut self, show_js: bool) -> Self {
        self.show_js = show_js;
        self
    }

    pub fn show_js(&self) -> bool {
        self.show_js
    }

    /// `print(x)`
    pub fn print(&mut self, text: impl Display) -> Result<()> {
        self.print_end(text, "\n")
    }

    /// `print(x, end=...)`
    pub fn print_end(&mut self, text: impl Display, end: &str) -> Result<()> {
        let line = format!("{}{}", text, end);
        self.out.write_str(&line)?;
        Ok(())
    }

    /// `print()`
    pub fn blank(&mut self) -> Result<()> {
        self.print("")
    }

    /// `print("=" * width)`
    pub fn separator(&mut self, width: usize) -> Result<()> {
        self.print("=".repeat(width))
    }

    /// Section header: separator, title, separator
    pub fn header(&mut self, width: usize, title: impl Display) -> Result<()> {
        trace!(width, "section header");
        self.separator(width)?;
        self.print(title)?;
        self.separator(width)
    }

    /// JS/TS equivalent of the code just shown; printed only when enabled
    pub fn js(&mut self, snippet: &str) -> Result<()> {
        if !self.show_js {
            return Ok(());
        }
        self.print("  // JS/TS:")?;
        for line in snippet.lines() {
            self.print(format!("  // {}", line))?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// `format(value, ".Nf")`
pub fn fixed(value: &Value, precision: usize) -> Result<String> {
    let f = value.as_f64().ok_or_else(|| {
        LessonError::value(format!(
            "Unknown format code 'f' for object of type '{}'",
            value.type_name()
        ))
    })?;
    Ok(format!("{:.*}", precision, f))
}

/// `template.format(*args)`
///
/// Supports automatic (`{}`) and explicit (`{0}`) field numbering, the
/// fixed-point spec `{:.2f}` and `{{`/`}}` escapes.
pub fn format_positional(template: &str, args: &[Value]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_auto = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => return Err(LessonError::value("expected '}' before end of string")),
                    }
                }
                let (index, spec) = match field.split_once(':') {
                    Some((index, spec)) => (index, Some(spec)),
                    None => (field.as_str(), None),
                };
                let position = if index.is_empty() {
                    next_auto += 1;
                    next_auto - 1
                } else {
                    index
                        .parse::<usize>()
                        .map_err(|_| LessonError::value(format!("unsupported format field '{}'", index)))?
                };
                let arg = args.get(position).ok_or_else(|| {
                    LessonError::value(format!("Replacement index {} out of range", position))
                })?;
                match spec {
                    None | Some("") => out.push_str(&arg.to_string()),
                    Some(spec) => out.push_str(&apply_spec(arg, spec)?),
                }
            }
            '}' => return Err(LessonError::value("Single '}' encountered in format string")),
            other => out.push(other),
        }
    }

    Ok(out)
}

fn apply_spec(arg: &Value, spec: &str) -> Result<String> {
    if let Some(precision) = spec.strip_prefix('.').and_then(|s| s.strip_suffix('f')) {
        let precision = precision
            .parse()
            .map_err(|_| LessonError::value(format!("Invalid format specifier '{}'", spec)))?;
        return fixed(arg, precision);
    }
    Err(LessonError::value(format!("Invalid format specifier '{}'", spec)))
}
