//! Breadth-first element traversal.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::node::TreeNode;
use crate::{Result, SectioError};

/// Parent id given to the first element visited.
pub const ROOT_PARENT_ID: usize = 0;

/// An element visited by [`walk`].
#[derive(Debug, Clone)]
pub struct ElementRecord<N> {
    /// Traversal-order id, starting at 1.
    pub id: usize,
    /// Id of the nearest element ancestor, or [`ROOT_PARENT_ID`].
    pub parent_id: usize,
    /// The element itself.
    pub node: N,
}

impl<N: TreeNode> ElementRecord<N> {
    /// Lowercase tag kind of the recorded element.
    pub fn tag_kind(&self) -> String {
        self.node.tag_kind().unwrap_or_default()
    }

    /// Whether the element's tag kind is one of `tags`.
    pub fn is_kind<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        self.node
            .tag_kind()
            .is_some_and(|kind| tags.iter().any(|t| t.as_ref().eq_ignore_ascii_case(&kind)))
    }
}

/// Visit every element under `root` in FIFO order.
///
/// Each element gets the next id when it is dequeued. Non-element nodes take
/// no id; their element children are recorded under the non-element's own
/// parent id, so a document node root hands [`ROOT_PARENT_ID`] to `<html>`.
///
/// # Errors
///
/// [`SectioError::MalformedTree`] when an element has an empty tag kind or
/// a node is reachable more than once.
pub fn walk<N: TreeNode>(root: &N) -> Result<Vec<ElementRecord<N>>> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    let mut next_id = 1;

    queue.push_back((root.clone(), ROOT_PARENT_ID));

    while let Some((node, parent_id)) = queue.pop_front() {
        if !seen.insert(node.key()) {
            return Err(SectioError::MalformedTree(format!(
                "node {:?} reached more than once",
                node.key()
            )));
        }

        let own_id = match node.tag_kind() {
            Some(kind) if kind.is_empty() => {
                return Err(SectioError::MalformedTree("element without a tag kind".to_string()));
            }
            Some(_) => {
                let id = next_id;
                next_id += 1;
                records.push(ElementRecord { id, parent_id, node: node.clone() });
                id
            }
            None => parent_id,
        };

        for child in node.children() {
            queue.push_back((child, own_id));
        }
    }

    debug!(elements = records.len(), "walked document tree");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::testing::ArenaTree;
    use crate::parse::Document;

    #[test]
    fn test_breadth_first_ids() {
        let doc = Document::parse("<html><body><div><p>a</p></div><div><p>b</p></div></body></html>").unwrap();
        let records = walk(&doc.root()).unwrap();
        let tags: Vec<String> = records.iter().map(|r| r.tag_kind()).collect();

        assert_eq!(tags, ["html", "head", "body", "div", "div", "p", "p"]);
        assert_eq!(records[0].parent_id, ROOT_PARENT_ID);
        // both divs hang off body, each p off its own div
        assert_eq!(records[3].parent_id, 3);
        assert_eq!(records[4].parent_id, 3);
        assert_eq!(records[5].parent_id, 4);
        assert_eq!(records[6].parent_id, 5);
    }

    #[test]
    fn test_ids_contiguous_from_one() {
        let doc = Document::parse(
            "<html><head><title>t</title></head><body><ul><li>1</li><li>2</li></ul><p>x<b>y</b></p></body></html>",
        )
        .unwrap();
        let records = walk(&doc.root()).unwrap();
        let ids: Vec<usize> = records.iter().map(|r| r.id).collect();
        let expected: Vec<usize> = (1..=records.len()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_text_nodes_take_no_id() {
        let mut tree = ArenaTree::new();
        let root = tree.element("div");
        let text = tree.text("hello");
        let p = tree.element("p");
        tree.append(root, text);
        tree.append(root, p);

        let records = walk(&tree.node(root)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].parent_id, 1);
    }

    #[test]
    fn test_cycle_is_malformed() {
        let mut tree = ArenaTree::new();
        let a = tree.element("div");
        let b = tree.element("div");
        tree.append(a, b);
        tree.append(b, a);

        let result = walk(&tree.node(a));
        assert!(matches!(result, Err(SectioError::MalformedTree(_))));
    }

    #[test]
    fn test_empty_tag_is_malformed() {
        let mut tree = ArenaTree::new();
        let root = tree.element("body");
        let bad = tree.element("");
        tree.append(root, bad);

        let result = walk(&tree.node(root));
        assert!(matches!(result, Err(SectioError::MalformedTree(_))));
    }

    #[test]
    fn test_is_kind() {
        let doc = Document::parse("<html><body><P>x</P></body></html>").unwrap();
        let records = walk(&doc.root()).unwrap();
        assert!(records.iter().any(|r| r.is_kind(&["p"])));
        assert!(!records.iter().any(|r| r.is_kind(&["article"])));
    }
}
