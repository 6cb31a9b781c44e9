//! Output sink abstraction: semantic styles, not escape codes.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

/// Semantic style tag; sinks decide how (or whether) to color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Success,
    Warning,
    Failure,
    Neutral,
    Alarm,
}

/// Destination for report text.
pub trait Sink {
    /// Write unstyled text verbatim.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Write text tagged with a style.
    fn write_styled(&mut self, style: Style, text: &str) -> Result<()>;

    /// Styled text followed by an unstyled newline.
    fn write_line_styled(&mut self, style: Style, text: &str) -> Result<()> {
        self.write_styled(style, text)?;
        self.write("\n")
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, text: &str) -> Result<()> {
        (**self).write(text)
    }

    fn write_styled(&mut self, style: Style, text: &str) -> Result<()> {
        (**self).write_styled(style, text)
    }
}

/// One recorded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub style: Option<Style>,
    pub text: String,
}

/// In-memory sink keeping every write with its style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    segments: Vec<Segment>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// All text concatenated, styles dropped.
    #[must_use]
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Style of the first segment whose text equals `text`.
    #[must_use]
    pub fn style_of(&self, text: &str) -> Option<Style> {
        self.segments
            .iter()
            .find(|s| s.text == text)
            .and_then(|s| s.style)
    }

    fn push(&mut self, style: Option<Style>, text: &str) {
        if text.is_empty() {
            return;
        }
        // Adjacent writes with the same style merge.
        if let Some(last) = self.segments.last_mut()
            && last.style == style
        {
            last.text.push_str(text);
            return;
        }
        self.segments.push(Segment {
            style,
            text: text.to_string(),
        });
    }
}

impl Sink for MemorySink {
    fn write(&mut self, text: &str) -> Result<()> {
        self.push(None, text);
        Ok(())
    }

    fn write_styled(&mut self, style: Style, text: &str) -> Result<()> {
        self.push(Some(style), text);
        Ok(())
    }
}
