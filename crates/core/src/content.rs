//! Extraction output with format conversion.
//!
//! [`ExtractedContent`] is everything one extraction pass produces: the
//! title, the main text, and the diagnostics that explain why that section
//! won.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::Result;
use crate::article::Section;
use crate::node::TreeNode;

/// Output format options for extracted content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Title, blank line, then the main text.
    PlainText,
    /// Compact JSON of the whole result.
    Json,
    /// Indented JSON of the whole result.
    JsonPretty,
}

/// An image element inside the selected section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// Traversal id of the `<img>` element.
    pub id: usize,
    /// The `src` attribute, resolved against the base URL when one is configured.
    pub src: Option<String>,
}

/// Per-section diagnostics, in ranking order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSummary {
    /// Traversal id of the section's parent element.
    pub id: usize,
    /// Paragraphs in the section, recovered ones included.
    pub paragraph_count: usize,
    /// Text mass used for selection.
    pub selection_mass: usize,
    /// Text mass including recovered paragraphs.
    pub display_mass: usize,
    /// Mean text-to-markup ratio of the section's paragraphs.
    pub mean_density: f64,
}

impl SectionSummary {
    /// Summarize a section's masses, size and mean density.
    pub fn from_section<N: TreeNode>(section: &Section<N>) -> Self {
        Self {
            id: section.id(),
            paragraph_count: section.paragraphs().len(),
            selection_mass: section.selection_mass(),
            display_mass: section.display_mass(),
            mean_density: section.mean_density(),
        }
    }
}

/// The result of one extraction pass.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedContent {
    /// Document title cut at the first separator, if the document has one.
    pub title: Option<String>,
    /// Selected section's paragraphs in document order, one per line.
    pub content: String,
    /// Traversal id of the selected section.
    pub section_id: usize,
    /// Selection mass of the selected section.
    pub selection_mass: usize,
    /// Paragraphs added to sections after selection.
    pub recovered: usize,
    /// Elements visited by the walker.
    pub element_count: usize,
    /// Paragraph-like elements found by the primary pass.
    pub paragraph_count: usize,
    /// Words in `content`.
    pub word_count: usize,
    /// Images inside the selected section.
    pub images: Vec<ImageRef>,
    /// Ranked section diagnostics.
    pub sections: Vec<SectionSummary>,
}

impl ExtractedContent {
    /// Converts the result to the specified format.
    pub fn to_format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::PlainText => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Gets the result as a `serde_json::Value`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Title (when present), a blank line, then the content.
    pub fn to_text(&self) -> String {
        match &self.title {
            Some(title) if !title.is_empty() => format!("{}\n\n{}", title, self.content),
            _ => self.content.clone(),
        }
    }
}

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[\w'-]+\b").expect("word pattern is valid"));

/// Count words with a Unicode-aware word pattern.
pub(crate) fn count_words(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}
