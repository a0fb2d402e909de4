//! Paragraph records with normalized, cached text.

use std::cell::OnceCell;

use tracing::debug;

use crate::node::TreeNode;
use crate::walker::ElementRecord;

/// Tag kinds treated as paragraph-like unless the caller overrides them.
pub const DEFAULT_PARAGRAPH_TAGS: &[&str] = &["p"];

/// Strip control characters, noncharacters and ideographic spaces.
///
/// Removes U+0000–U+0008, U+000B–U+000C, U+000E–U+001F, U+FFFE, U+FFFF and
/// U+3000. Tab, line feed and carriage return survive. A `str` cannot hold
/// unpaired surrogates, so those are already gone after decoding.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            !matches!(
                c,
                '\u{0000}'..='\u{0008}'
                    | '\u{000B}'..='\u{000C}'
                    | '\u{000E}'..='\u{001F}'
                    | '\u{FFFE}'..='\u{FFFF}'
                    | '\u{3000}'
            )
        })
        .collect()
}

/// A paragraph-like element and its normalized text.
#[derive(Debug, Clone)]
pub struct Paragraph<N> {
    pub id: usize,
    pub parent_id: usize,
    pub node: N,
    text: String,
    length: usize,
    density: OnceCell<f64>,
}

impl<N: TreeNode> Paragraph<N> {
    /// Wrap an element, normalizing its text once.
    pub fn new(id: usize, parent_id: usize, node: N) -> Self {
        let text = normalize_text(&node.text());
        let length = text.chars().count();
        Self { id, parent_id, node, text, length, density: OnceCell::new() }
    }

    /// Build from a walker record.
    pub fn from_record(record: &ElementRecord<N>) -> Self {
        Self::new(record.id, record.parent_id, record.node.clone())
    }

    /// Normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character count of the normalized text.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Ratio of text characters to serialized HTML characters.
    ///
    /// Diagnostic only; selection never reads it. Computed on first use.
    pub fn density(&self) -> f64 {
        *self.density.get_or_init(|| {
            let html_len = self.node.outer_html().chars().count();
            if html_len == 0 { 0.0 } else { self.length as f64 / html_len as f64 }
        })
    }
}

/// Wrap every record whose tag kind is in `paragraph_tags`, in traversal order.
pub fn build_paragraphs<N: TreeNode, S: AsRef<str>>(
    records: &[ElementRecord<N>], paragraph_tags: &[S],
) -> Vec<Paragraph<N>> {
    let paragraphs: Vec<Paragraph<N>> = records
        .iter()
        .filter(|record| record.is_kind(paragraph_tags))
        .map(Paragraph::from_record)
        .collect();

    debug!(paragraphs = paragraphs.len(), "built paragraphs");
    paragraphs
}
