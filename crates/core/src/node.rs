//! Tree capability interface consumed by the extraction core.
//!
//! The section algorithm never touches a concrete parser type. It works on
//! anything implementing [`TreeNode`]; [`HtmlNode`] adapts `scraper`'s
//! document tree to it.

use std::fmt::Debug;
use std::hash::Hash;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Node};

/// A borrowed handle into a parsed document tree.
///
/// Implementors must be cheap to clone; the walker stores one handle per
/// element for the duration of an extraction pass.
pub trait TreeNode: Clone + Debug {
    /// Identity used to detect nodes reachable more than once.
    type Key: Eq + Hash + Debug;

    /// Stable identity of this node within its tree.
    fn key(&self) -> Self::Key;

    /// Lowercase tag kind for element nodes, `None` for text, comment and
    /// document nodes.
    fn tag_kind(&self) -> Option<String>;

    /// Child nodes in document order, including non-element children.
    fn children(&self) -> Vec<Self>;

    /// Concatenated text of this node and all of its descendants.
    fn text(&self) -> String;

    /// Serialized HTML of this node.
    fn outer_html(&self) -> String;

    /// Attribute value, if this is an element carrying `name`.
    fn attr(&self, name: &str) -> Option<String>;

    /// Whether this node is an element.
    fn is_element(&self) -> bool {
        self.tag_kind().is_some()
    }
}

/// [`TreeNode`] adapter over a `scraper` document node.
#[derive(Clone, Copy, Debug)]
pub struct HtmlNode<'a> {
    node: NodeRef<'a, Node>,
}

impl<'a> HtmlNode<'a> {
    /// Wraps a raw ego-tree node reference.
    pub fn new(node: NodeRef<'a, Node>) -> Self {
        Self { node }
    }

    /// The wrapped node reference.
    pub fn node_ref(&self) -> NodeRef<'a, Node> {
        self.node
    }
}

impl<'a> From<ElementRef<'a>> for HtmlNode<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self::new(*element)
    }
}

impl TreeNode for HtmlNode<'_> {
    type Key = NodeId;

    fn key(&self) -> NodeId {
        self.node.id()
    }

    fn tag_kind(&self) -> Option<String> {
        self.node.value().as_element().map(|el| el.name().to_lowercase())
    }

    fn children(&self) -> Vec<Self> {
        self.node.children().map(HtmlNode::new).collect()
    }

    fn text(&self) -> String {
        self.node
            .descendants()
            .filter_map(|n| n.value().as_text())
            .map(|t| &**t)
            .collect()
    }

    fn outer_html(&self) -> String {
        match ElementRef::wrap(self.node) {
            Some(element) => element.html(),
            None => self.text(),
        }
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.node
            .value()
            .as_element()
            .and_then(|el| el.attr(name))
            .map(str::to_string)
    }
}

/// Arena-backed tree for exercising the core against hand-built, possibly
/// malformed, inputs.
#[cfg(test)]
pub(crate) mod testing {
    use super::TreeNode;

    #[derive(Debug, Default)]
    pub(crate) struct ArenaTree {
        nodes: Vec<ArenaData>,
    }

    #[derive(Debug)]
    struct ArenaData {
        tag: Option<String>,
        text: String,
        children: Vec<usize>,
    }

    impl ArenaTree {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn element(&mut self, tag: &str) -> usize {
            self.push(Some(tag.to_string()), String::new())
        }

        pub(crate) fn text(&mut self, text: &str) -> usize {
            self.push(None, text.to_string())
        }

        pub(crate) fn append(&mut self, parent: usize, child: usize) {
            self.nodes[parent].children.push(child);
        }

        pub(crate) fn node(&self, index: usize) -> ArenaNode<'_> {
            ArenaNode { tree: self, index }
        }

        fn push(&mut self, tag: Option<String>, text: String) -> usize {
            self.nodes.push(ArenaData { tag, text, children: Vec::new() });
            self.nodes.len() - 1
        }
    }

    #[derive(Clone, Copy, Debug)]
    pub(crate) struct ArenaNode<'a> {
        tree: &'a ArenaTree,
        index: usize,
    }

    impl TreeNode for ArenaNode<'_> {
        type Key = usize;

        fn key(&self) -> usize {
            self.index
        }

        fn tag_kind(&self) -> Option<String> {
            self.tree.nodes[self.index].tag.clone()
        }

        fn children(&self) -> Vec<Self> {
            self.tree.nodes[self.index]
                .children
                .iter()
                .map(|&index| ArenaNode { tree: self.tree, index })
                .collect()
        }

        fn text(&self) -> String {
            let mut out = self.tree.nodes[self.index].text.clone();
            for child in self.children() {
                out.push_str(&child.text());
            }
            out
        }

        fn outer_html(&self) -> String {
            match self.tag_kind() {
                Some(tag) => format!("<{tag}>{}</{tag}>", self.text()),
                None => self.text(),
            }
        }

        fn attr(&self, _name: &str) -> Option<String> {
            None
        }
    }
}
