//! Main content extraction API.
//!
//! The pipeline runs strictly forward: sanitize the tree, walk it
//! breadth-first, wrap paragraph-like elements, aggregate them into sections
//! by parent, select the section with the largest text mass, then recover
//! missed fragments into existing sections. The title is looked up on the
//! same sanitized tree, independently of the content.
//!
//! # Example
//!
//! ```rust
//! use sectio_core::{ExtractConfig, extract_html};
//!
//! let html = "<html><body><div><p>AAAA</p><p>BBBB</p></div><div><p>C</p></div></body></html>";
//! let extracted = extract_html(html, &ExtractConfig::default()).unwrap();
//! assert_eq!(extracted.content, "AAAA\nBBBB");
//! ```

use std::collections::HashMap;

use tracing::{debug, debug_span};
use url::Url;

use crate::article::Article;
use crate::content::{ExtractedContent, ImageRef, SectionSummary, count_words};
use crate::node::TreeNode;
use crate::paragraph::{DEFAULT_PARAGRAPH_TAGS, build_paragraphs};
use crate::parse::Document;
use crate::reconcile::reconcile;
use crate::sanitize::{DEFAULT_EXCLUDED_TAGS, sanitize};
use crate::scoring::{rank_sections, select_main_section};
use crate::title::{DEFAULT_TITLE_SEPARATORS, extract_title};
use crate::walker::{ElementRecord, ROOT_PARENT_ID, walk};
use crate::{Result, SectioError};

/// Heading and block kinds worth recovering when a caller opts in through
/// [`ExtractConfigBuilder::recover_tags`]. Not enabled by default.
pub const DEFAULT_RECOVER_TAGS: &[&str] = &["h2", "h3", "h4", "h5", "h6", "blockquote", "pre"];

/// Configuration for content extraction.
///
/// # Example
///
/// ```rust
/// use sectio_core::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .paragraph_tags(["p", "pre"])
///     .reconcile(false)
///     .build();
/// assert!(!config.reconcile);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Tag kinds removed with their subtrees before analysis.
    pub excluded_tags: Vec<String>,
    /// Tag kinds whose elements form sections.
    pub paragraph_tags: Vec<String>,
    /// Additional tag kinds the reconciler may recover into existing sections.
    /// Empty by default, so only paragraph-like elements are recovered.
    pub recover_tags: Vec<String>,
    /// Separators that end the headline part of the title.
    pub title_separators: Vec<String>,
    /// Whether to run the reconciliation pass.
    pub reconcile: bool,
    /// Base URL for resolving image sources.
    pub base_url: Option<Url>,
    /// How many ranked sections to summarize (0 = all).
    pub max_debug_sections: usize,
}

fn owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            excluded_tags: owned(DEFAULT_EXCLUDED_TAGS),
            paragraph_tags: owned(DEFAULT_PARAGRAPH_TAGS),
            recover_tags: Vec::new(),
            title_separators: owned(DEFAULT_TITLE_SEPARATORS),
            reconcile: true,
            base_url: None,
            max_debug_sections: 5,
        }
    }
}

impl ExtractConfig {
    /// Creates a new builder for ExtractConfig.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }

    /// Tag kinds the reconciler considers: paragraph tags plus recover tags.
    pub fn reconcile_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.paragraph_tags.iter().map(String::as_str).collect();
        for tag in &self.recover_tags {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push(tag);
            }
        }
        tags
    }
}

/// Builder for ExtractConfig.
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractConfig::default() }
    }

    /// Replaces the excluded tag kinds.
    pub fn excluded_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.excluded_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the paragraph tag kinds.
    pub fn paragraph_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.paragraph_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the recoverable tag kinds.
    pub fn recover_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.recover_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the title separators.
    pub fn title_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.title_separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether to run reconciliation.
    pub fn reconcile(mut self, value: bool) -> Self {
        self.config.reconcile = value;
        self
    }

    /// Sets the base URL for image sources.
    pub fn base_url(mut self, url: Url) -> Self {
        self.config.base_url = Some(url);
        self
    }

    /// Sets how many ranked sections to summarize.
    pub fn max_debug_sections(mut self, value: usize) -> Self {
        self.config.max_debug_sections = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

impl Default for ExtractConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `html` and extract its main content.
pub fn extract_html(html: &str, config: &ExtractConfig) -> Result<ExtractedContent> {
    let doc = Document::parse(html)?;
    extract(doc, config)
}

/// Sanitize `doc` in place and extract its main content.
///
/// The document is consumed: sanitization destroys the excluded subtrees.
///
/// # Errors
///
/// [`SectioError::EmptyDocument`] when no paragraph-like element with text
/// survives sanitization.
pub fn extract(mut doc: Document, config: &ExtractConfig) -> Result<ExtractedContent> {
    let _span = debug_span!("extract").entered();
    sanitize(&mut doc, &config.excluded_tags);
    extract_tree(&doc.root(), config)
}

/// Extract the main content of an already sanitized tree.
///
/// Generic over any [`TreeNode`] implementation.
pub fn extract_tree<N: TreeNode>(root: &N, config: &ExtractConfig) -> Result<ExtractedContent> {
    let records = walk(root)?;
    let paragraphs = build_paragraphs(&records, &config.paragraph_tags);
    let paragraph_count = paragraphs.len();

    let mut article = Article::from_paragraphs(paragraphs);
    let (section_id, selection_mass) = {
        let winner = select_main_section(&article)?;
        (winner.id(), winner.selection_mass())
    };

    let recovered = if config.reconcile { reconcile(&records, &mut article, &config.reconcile_tags()) } else { 0 };

    let winner = article
        .section(section_id)
        .ok_or_else(|| SectioError::MalformedTree(format!("selected section {} vanished", section_id)))?;
    let content = winner.text();

    let limit = if config.max_debug_sections == 0 { usize::MAX } else { config.max_debug_sections };
    let sections = rank_sections(&article)
        .into_iter()
        .take(limit)
        .map(SectionSummary::from_section)
        .collect();

    let title = match extract_title(root, &config.title_separators) {
        Ok(title) => Some(title),
        Err(SectioError::NoTitle) => None,
        Err(e) => return Err(e),
    };

    debug!(section = section_id, mass = selection_mass, recovered, title = ?title, "extraction finished");

    Ok(ExtractedContent {
        title,
        word_count: count_words(&content),
        content,
        section_id,
        selection_mass,
        recovered,
        element_count: records.len(),
        paragraph_count,
        images: section_images(&records, section_id, config.base_url.as_ref()),
        sections,
    })
}

/// `<img>` elements that descend from the element keyed by `section_id`.
fn section_images<N: TreeNode>(
    records: &[ElementRecord<N>], section_id: usize, base_url: Option<&Url>,
) -> Vec<ImageRef> {
    let parents: HashMap<usize, usize> = records.iter().map(|r| (r.id, r.parent_id)).collect();

    let descends_from_section = |mut id: usize| {
        while id != ROOT_PARENT_ID {
            let Some(&parent) = parents.get(&id) else {
                return false;
            };
            if parent == section_id {
                return true;
            }
            id = parent;
        }
        false
    };

    records
        .iter()
        .filter(|record| record.is_kind(&["img"]) && descends_from_section(record.id))
        .map(|record| ImageRef { id: record.id, src: record.node.attr("src").map(|src| resolve(&src, base_url)) })
        .collect()
}

fn resolve(src: &str, base_url: Option<&Url>) -> String {
    match base_url.map(|base| base.join(src)) {
        Some(Ok(url)) => url.to_string(),
        _ => src.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::testing::ArenaTree;

    #[test]
    fn test_end_to_end_scenario() {
        let html = "<html><body><div><p>AAAA</p><p>BBBB</p></div><div><p>C</p></div></body></html>";
        let extracted = extract_html(html, &ExtractConfig::default()).unwrap();

        assert_eq!(extracted.content, "AAAA\nBBBB");
        assert_eq!(extracted.selection_mass, 8);
        assert_eq!(extracted.paragraph_count, 3);
        assert_eq!(extracted.title, None);
        assert_eq!(extracted.sections.len(), 2);
        assert_eq!(extracted.sections[0].id, extracted.section_id);
    }

    #[test]
    fn test_script_contributes_nothing() {
        let extracted =
            extract_html("<script>ignored</script><p>real text</p>", &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.content, "real text");
    }

    #[test]
    fn test_excluded_paragraph_container() {
        let html = "<html><body>\
            <noscript><p>enable javascript please, it is required</p></noscript>\
            <div><p>ok</p></div>\
            </body></html>";
        let extracted = extract_html(html, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.content, "ok");
    }

    #[test]
    fn test_empty_document() {
        let result = extract_html("<html><body><div>only a div</div></body></html>", &ExtractConfig::default());
        assert!(matches!(result, Err(SectioError::EmptyDocument)));
    }

    #[test]
    fn test_textless_paragraphs_are_empty_document() {
        for html in ["<html><body><p></p><div></div></body></html>", "<html><body><p>\u{3000}</p></body></html>"] {
            let result = extract_html(html, &ExtractConfig::default());
            assert!(matches!(result, Err(SectioError::EmptyDocument)), "expected empty document for {}", html);
        }
    }

    #[test]
    fn test_title_is_truncated() {
        let html = "<html><head><title>Headline | Site Name</title></head><body><p>Body</p></body></html>";
        let extracted = extract_html(html, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.title.as_deref(), Some("Headline"));
    }

    #[test]
    fn test_default_content_is_paragraphs_only() {
        let html = "<div><h2>Heading</h2><p>AAAA</p><p>BBBB</p></div><div><p>C</p></div>";
        let extracted = extract_html(html, &ExtractConfig::default()).unwrap();

        assert_eq!(extracted.content, "AAAA\nBBBB");
        assert_eq!(extracted.recovered, 0);
    }

    #[test]
    fn test_reconcile_toggle() {
        let html = "<html><body><article><h2>Sub</h2><p>Long paragraph text</p></article></body></html>";

        let config = ExtractConfig::builder().recover_tags(DEFAULT_RECOVER_TAGS.iter().copied()).build();
        let with = extract_html(html, &config).unwrap();
        assert_eq!(with.content, "Sub\nLong paragraph text");
        assert_eq!(with.recovered, 1);

        let without = extract_html(
            html,
            &ExtractConfig::builder().recover_tags(["h2"]).reconcile(false).build(),
        )
        .unwrap();
        assert_eq!(without.content, "Long paragraph text");
        assert_eq!(without.recovered, 0);
        assert_eq!(with.section_id, without.section_id);
    }

    #[test]
    fn test_images_in_winning_section() {
        let html = r#"<html><body>
            <div><p>Main body text here</p><figure><img src="/a.png"></figure></div>
            <div><p>x</p><img src="/b.png"></div>
        </body></html>"#;
        let config = ExtractConfig::builder().base_url(Url::parse("https://example.com/post/").unwrap()).build();
        let extracted = extract_html(html, &config).unwrap();

        assert_eq!(extracted.images.len(), 1);
        assert_eq!(extracted.images[0].src.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn test_max_debug_sections() {
        let html = "<html><body><div><p>a</p></div><div><p>bb</p></div><div><p>ccc</p></div></body></html>";
        let config = ExtractConfig::builder().max_debug_sections(1).build();
        let extracted = extract_html(html, &config).unwrap();
        assert_eq!(extracted.sections.len(), 1);
        assert_eq!(extracted.content, "ccc");

        let all = extract_html(html, &ExtractConfig::builder().max_debug_sections(0).build()).unwrap();
        assert_eq!(all.sections.len(), 3);
    }

    #[test]
    fn test_reconcile_tags_deduplicated() {
        let config = ExtractConfig::builder().paragraph_tags(["p", "pre"]).recover_tags(["PRE", "h2"]).build();
        assert_eq!(config.reconcile_tags(), ["p", "pre", "h2"]);
    }

    #[test]
    fn test_extract_tree_over_custom_nodes() {
        let mut tree = ArenaTree::new();
        let body = tree.element("body");
        let div = tree.element("div");
        tree.append(body, div);
        for text in ["one", "two"] {
            let p = tree.element("p");
            let t = tree.text(text);
            tree.append(p, t);
            tree.append(div, p);
        }

        let extracted = extract_tree(&tree.node(body), &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.content, "one\ntwo");
        assert_eq!(extracted.section_id, 2);
        assert_eq!(extracted.element_count, 4);
    }

    #[test]
    fn test_malformed_tree_aborts() {
        let mut tree = ArenaTree::new();
        let body = tree.element("body");
        let p = tree.element("p");
        tree.append(body, p);
        tree.append(p, body);

        let result = extract_tree(&tree.node(body), &ExtractConfig::default());
        assert!(matches!(result, Err(SectioError::MalformedTree(_))));
    }
}
