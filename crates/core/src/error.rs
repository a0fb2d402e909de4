//! Error types for Sectio operations.
//!
//! This module defines the main error type [`SectioError`] which represents
//! every way an extraction pass can fail. Errors are never retried inside
//! the library; callers decide on fallbacks.
//!
//! # Example
//!
//! ```rust
//! use sectio_core::{SectioError, Result};
//!
//! fn main_text(html: &str) -> Result<String> {
//!     if html.is_empty() {
//!         return Err(SectioError::EmptyDocument);
//!     }
//!     // ... extraction logic
//!     # Ok(String::new())
//! }
//! ```

use thiserror::Error;

/// Main error type for content extraction.
///
/// # Example
///
/// ```rust
/// use sectio_core::{ExtractConfig, SectioError, extract_html};
///
/// match extract_html("<html><body></body></html>", &ExtractConfig::default()) {
///     Ok(extracted) => println!("{}", extracted.content),
///     Err(SectioError::EmptyDocument) => println!("nothing to extract"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum SectioError {
    /// The document has no paragraph-like elements carrying text, so no
    /// section can be selected.
    #[error("No paragraph-like elements with text found in the document")]
    EmptyDocument,

    /// The document has no title element.
    ///
    /// The extraction pipeline downgrades this to a missing title; it only
    /// surfaces from the standalone title functions.
    #[error("No title element found in the document")]
    NoTitle,

    /// The supplied tree violates the node contract.
    ///
    /// Returned for elements without a tag kind and for nodes reachable
    /// more than once (cycles or shared children).
    #[error("Malformed tree input: {0}")]
    MalformedTree(String),

    /// Output serialization errors.
    #[error("Failed to serialize output: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SectioError {
    fn from(err: serde_json::Error) -> Self {
        SectioError::Serialization(err.to_string())
    }
}

/// Result type alias for SectioError.
pub type Result<T> = std::result::Result<T, SectioError>;
