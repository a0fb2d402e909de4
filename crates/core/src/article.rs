//! Sections of sibling paragraphs and the article that indexes them.
//!
//! A [`Section`] collects the paragraph-like elements sharing one structural
//! parent; its id is that parent's traversal id. An [`Article`] keeps the
//! sections in first-seen order, which is what makes tie-breaking during
//! selection deterministic.
//!
//! Sections track two masses. The selection mass only ever grows during the
//! primary aggregation pass; paragraphs recovered afterwards go to the
//! display mass alone, so reconciliation can never change the winner.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::node::TreeNode;
use crate::paragraph::Paragraph;

/// Paragraph-like elements sharing one parent element.
#[derive(Debug, Clone)]
pub struct Section<N> {
    id: usize,
    paragraphs: Vec<Paragraph<N>>,
    selection_mass: usize,
    display_mass: usize,
}

impl<N: TreeNode> Section<N> {
    fn new(id: usize) -> Self {
        Self { id, paragraphs: Vec::new(), selection_mass: 0, display_mass: 0 }
    }

    /// Traversal id of the parent element this section is keyed by.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Paragraphs in the order they were added.
    pub fn paragraphs(&self) -> &[Paragraph<N>] {
        &self.paragraphs
    }

    /// Text length known when the section was aggregated.
    pub fn selection_mass(&self) -> usize {
        self.selection_mass
    }

    /// Text length including recovered paragraphs.
    pub fn display_mass(&self) -> usize {
        self.display_mass
    }

    /// Add a paragraph found by the primary pass.
    fn push_primary(&mut self, paragraph: Paragraph<N>) {
        self.selection_mass += paragraph.length();
        self.display_mass += paragraph.length();
        self.paragraphs.push(paragraph);
    }

    /// Add a paragraph recovered after selection. Selection mass is untouched.
    fn push_recovered(&mut self, paragraph: Paragraph<N>) {
        self.display_mass += paragraph.length();
        self.paragraphs.push(paragraph);
    }

    /// Paragraphs sorted by ascending id, i.e. document traversal order.
    pub fn ordered_paragraphs(&self) -> Vec<&Paragraph<N>> {
        let mut ordered: Vec<&Paragraph<N>> = self.paragraphs.iter().collect();
        ordered.sort_by_key(|p| p.id);
        ordered
    }

    /// Paragraph texts in ascending id order, trimmed and joined with `\n`.
    pub fn text(&self) -> String {
        self.ordered_paragraphs()
            .iter()
            .map(|p| p.text().trim())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Mean paragraph density, or 0 for an empty section.
    pub fn mean_density(&self) -> f64 {
        if self.paragraphs.is_empty() {
            return 0.0;
        }
        self.paragraphs.iter().map(Paragraph::density).sum::<f64>() / self.paragraphs.len() as f64
    }
}

/// All sections of one extraction pass plus every paragraph id recorded so far.
#[derive(Debug, Clone)]
pub struct Article<N> {
    sections: Vec<Section<N>>,
    index: HashMap<usize, usize>,
    seen: HashSet<usize>,
}

impl<N: TreeNode> Article<N> {
    /// Creates an empty article.
    pub fn new() -> Self {
        Self { sections: Vec::new(), index: HashMap::new(), seen: HashSet::new() }
    }

    /// Group paragraphs by parent id, accumulating selection mass.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph<N>>) -> Self {
        let mut article = Self::new();
        for paragraph in paragraphs {
            article.add_primary(paragraph);
        }
        debug!(sections = article.len(), "aggregated sections");
        article
    }

    /// Add a paragraph from the primary pass, creating its section on first use.
    ///
    /// Returns `false` if the paragraph id was already recorded.
    pub fn add_primary(&mut self, paragraph: Paragraph<N>) -> bool {
        if !self.seen.insert(paragraph.id) {
            return false;
        }
        let position = match self.index.get(&paragraph.parent_id) {
            Some(&position) => position,
            None => {
                self.sections.push(Section::new(paragraph.parent_id));
                self.index.insert(paragraph.parent_id, self.sections.len() - 1);
                self.sections.len() - 1
            }
        };
        self.sections[position].push_primary(paragraph);
        true
    }

    /// Add a recovered paragraph to the existing section keyed by its parent id.
    ///
    /// Never creates a section and never records an id twice. Returns whether
    /// the paragraph was added.
    pub fn add_recovered(&mut self, paragraph: Paragraph<N>) -> bool {
        if self.seen.contains(&paragraph.id) {
            return false;
        }
        let Some(&position) = self.index.get(&paragraph.parent_id) else {
            return false;
        };
        self.seen.insert(paragraph.id);
        self.sections[position].push_recovered(paragraph);
        true
    }

    /// Whether a paragraph id has been recorded.
    pub fn contains_paragraph(&self, id: usize) -> bool {
        self.seen.contains(&id)
    }

    /// Section keyed by `id`, if one exists.
    pub fn section(&self, id: usize) -> Option<&Section<N>> {
        self.index.get(&id).map(|&position| &self.sections[position])
    }

    /// Sections in first-seen order.
    pub fn sections(&self) -> &[Section<N>] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section exists.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<N: TreeNode> Default for Article<N> {
    fn default() -> Self {
        Self::new()
    }
}
