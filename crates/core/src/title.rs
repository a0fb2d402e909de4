//! Document title lookup and site-name truncation.

use std::collections::HashSet;

use crate::node::TreeNode;
use crate::{Result, SectioError};

/// Separators that split a headline from the site name, e.g. `Headline | Site`.
pub const DEFAULT_TITLE_SEPARATORS: &[&str] = &["_", "——", "|"];

/// First `<title>` element in document order (depth-first, pre-order).
///
/// Nodes reachable twice are visited once.
pub fn find_title<N: TreeNode>(root: &N) -> Option<N> {
    let mut stack = vec![root.clone()];
    let mut seen = HashSet::new();

    while let Some(node) = stack.pop() {
        if !seen.insert(node.key()) {
            continue;
        }
        if node.tag_kind().as_deref() == Some("title") {
            return Some(node);
        }
        stack.extend(node.children().into_iter().rev());
    }

    None
}

/// Cut `text` at the earliest occurrence of any separator and trim the head.
///
/// Empty separators are ignored. Text without a separator is only trimmed.
///
/// ```rust
/// use sectio_core::title::{DEFAULT_TITLE_SEPARATORS, truncate_title};
///
/// assert_eq!(truncate_title("Headline | Site Name", DEFAULT_TITLE_SEPARATORS), "Headline");
/// assert_eq!(truncate_title("Title_Subtitle", DEFAULT_TITLE_SEPARATORS), "Title");
/// ```
pub fn truncate_title<S: AsRef<str>>(text: &str, separators: &[S]) -> String {
    let cut = separators
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|sep| !sep.is_empty())
        .filter_map(|sep| text.find(sep))
        .min()
        .unwrap_or(text.len());

    text[..cut].trim().to_string()
}

/// Title of the document under `root`, truncated at the first separator.
///
/// # Errors
///
/// [`SectioError::NoTitle`] when the document has no `<title>` element.
pub fn extract_title<N: TreeNode, S: AsRef<str>>(root: &N, separators: &[S]) -> Result<String> {
    let title = find_title(root).ok_or(SectioError::NoTitle)?;
    Ok(truncate_title(&title.text(), separators))
}
