//! Terminal sink: maps semantic styles onto ANSI colors via `colored`.

#![allow(missing_docs)]

use std::io::Write;

use colored::{ColoredString, Colorize};

use crate::core::errors::{Result, RpError};
use crate::report::sink::{Sink, Style};

/// Colorize `text` for `style`. Respects `colored::control` overrides.
#[must_use]
pub fn paint(style: Style, text: &str) -> ColoredString {
    match style {
        Style::Success => text.green(),
        Style::Warning => text.yellow(),
        Style::Failure => text.red(),
        Style::Neutral => text.white(),
        Style::Alarm => text.white().bold().on_red(),
    }
}

/// Writes report text to any `io::Write`, flushing after each write so
/// progress glyphs appear as tests finish.
pub struct ConsoleSink<W: Write> {
    out: W,
    target: &'static str,
}

impl<W: Write> ConsoleSink<W> {
    /// `target` names the stream in IO errors (e.g. `"<stdout>"`).
    pub fn new(out: W, target: &'static str) -> Self {
        Self { out, target }
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|source| RpError::io(self.target, source))
    }
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.emit(text)
    }

    /// Each line is painted separately so no escape sequence spans a newline.
    fn write_styled(&mut self, style: Style, text: &str) -> Result<()> {
        let mut painted = String::with_capacity(text.len() + 16);
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                painted.push('\n');
            }
            if !line.is_empty() {
                painted.push_str(&paint(style, line).to_string());
            }
        }
        self.emit(&painted)
    }
}
