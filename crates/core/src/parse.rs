//! HTML parsing into an owned document tree.
//!
//! [`Document`] owns the parsed `scraper` tree for the duration of one
//! extraction pass. The tree is mutable so the sanitizer can remove
//! non-content subtrees in place before analysis.
//!
//! # Example
//!
//! ```rust
//! use sectio_core::Document;
//!
//! let html = r#"
//!     <html>
//!         <head><title>Title</title></head>
//!         <body><p>Paragraph</p></body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! assert!(doc.as_string().contains("Paragraph"));
//! ```

use scraper::Html;

use crate::Result;
use crate::node::HtmlNode;

/// A parsed HTML document.
///
/// Encoding detection happens upstream; the input is already decoded text.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from malformed markup, so parsing itself never
    /// fails; the `Result` keeps room for stricter front ends.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sectio_core::Document;
    ///
    /// let doc = Document::parse("<html><body><p>Hi</p></body></html>").unwrap();
    /// ```
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Mutable access to the underlying tree, for in-place sanitization.
    pub(crate) fn html_mut(&mut self) -> &mut Html {
        &mut self.html
    }

    /// The document node, as a [`HtmlNode`].
    ///
    /// This is the root the walker starts from; it is not an element, so the
    /// `<html>` element receives the first traversal id.
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode::new(self.html.tree.root())
    }

    /// Gets the entire HTML as a string.
    pub fn as_string(&self) -> String {
        self.html.html()
    }
}
