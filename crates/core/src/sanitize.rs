//! In-place removal of non-content subtrees.

use ego_tree::{NodeId, NodeRef};
use scraper::Node;
use tracing::debug;

use crate::parse::Document;

/// Tag kinds removed before analysis unless the caller overrides them.
pub const DEFAULT_EXCLUDED_TAGS: &[&str] = &["script", "style", "iframe", "noscript", "link", "meta", "ins"];

fn is_excluded<S: AsRef<str>>(node: &NodeRef<'_, Node>, excluded_tags: &[S]) -> bool {
    match node.value() {
        Node::Element(el) => excluded_tags.iter().any(|tag| tag.as_ref().eq_ignore_ascii_case(el.name())),
        _ => false,
    }
}

/// Remove every element whose tag kind is in `excluded_tags`, together with
/// its subtree, from `doc`.
///
/// The document is mutated in place. Returns the number of subtrees removed;
/// excluded elements nested inside another excluded element go with their
/// ancestor and are not counted separately.
pub fn sanitize<S: AsRef<str>>(doc: &mut Document, excluded_tags: &[S]) -> usize {
    let html = doc.html_mut();

    let targets: Vec<NodeId> = html
        .tree
        .root()
        .descendants()
        .filter(|node| is_excluded(node, excluded_tags))
        .filter(|node| !node.ancestors().any(|a| is_excluded(&a, excluded_tags)))
        .map(|node| node.id())
        .collect();

    for id in &targets {
        if let Some(mut node) = html.tree.get_mut(*id) {
            node.detach();
        }
    }

    debug!(removed = targets.len(), "sanitized document");
    targets.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_default_tags() {
        let html = r#"
            <html>
                <head>
                    <meta charset="utf-8">
                    <link rel="stylesheet" href="a.css">
                    <script>alert('test');</script>
                    <style>body{color:red;}</style>
                </head>
                <body>
                    <noscript>Enable JavaScript</noscript>
                    <iframe src="https://example.com"></iframe>
                    <ins class="adsbygoogle">Ad</ins>
                    <p>Content</p>
                </body>
            </html>
        "#;

        let mut doc = Document::parse(html).unwrap();
        let removed = sanitize(&mut doc, DEFAULT_EXCLUDED_TAGS);
        let result = doc.as_string();

        assert_eq!(removed, 7);
        assert!(!result.contains("<script"));
        assert!(!result.contains("alert"), "Script content should be removed");
        assert!(!result.contains("color:red"), "Style content should be removed");
        assert!(!result.contains("<meta"));
        assert!(!result.contains("<link"));
        assert!(!result.contains("<iframe"));
        assert!(!result.contains("Ad</ins>"));
        assert!(result.contains("<p>Content</p>"));
    }

    #[test]
    fn test_nested_excluded_counted_once() {
        let mut doc = Document::parse("<body><ins><script>x()</script></ins><p>kept</p></body>").unwrap();
        assert_eq!(sanitize(&mut doc, &["ins", "script"]), 1);
        assert!(!doc.as_string().contains("x()"));
    }

    #[test]
    fn test_custom_tags_case_insensitive() {
        let mut doc = Document::parse("<body><aside>side</aside><p>main</p></body>").unwrap();
        sanitize(&mut doc, &["ASIDE".to_string()]);
        let result = doc.as_string();
        assert!(!result.contains("side"));
        assert!(result.contains("main"));
    }

    #[test]
    fn test_empty_exclusion_list_keeps_everything() {
        let mut doc = Document::parse("<body><script>s()</script><p>p</p></body>").unwrap();
        let none: &[&str] = &[];
        assert_eq!(sanitize(&mut doc, none), 0);
        assert!(doc.as_string().contains("s()"));
    }
}
