//! Sibling element groups, a structural overview of the document.
//!
//! Every element with at least one element child yields a group of those
//! children. Sorting groups by size surfaces list-like structure such as
//! navigation menus next to the article body, which helps when tuning the
//! excluded and paragraph tag sets.

use serde::Serialize;

use crate::node::TreeNode;
use crate::walker::ElementRecord;

/// Element children of one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementGroup {
    /// Traversal id of the parent element.
    pub parent_id: usize,
    /// Ids of the member elements, in traversal order.
    pub member_ids: Vec<usize>,
    /// Tag kinds of the member elements, aligned with `member_ids`.
    pub tags: Vec<String>,
}

impl ElementGroup {
    /// Number of member elements.
    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }
}

/// Group records by parent id, in order of each group's first member.
pub fn group_children<N: TreeNode>(records: &[ElementRecord<N>]) -> Vec<ElementGroup> {
    let mut groups: Vec<ElementGroup> = Vec::new();
    let mut positions = std::collections::HashMap::new();

    for record in records {
        let position = *positions.entry(record.parent_id).or_insert_with(|| {
            groups.push(ElementGroup { parent_id: record.parent_id, member_ids: Vec::new(), tags: Vec::new() });
            groups.len() - 1
        });
        groups[position].member_ids.push(record.id);
        groups[position].tags.push(record.tag_kind());
    }

    groups
}

/// Largest groups first; equal sizes keep their traversal order.
pub fn sort_groups(mut groups: Vec<ElementGroup>) -> Vec<ElementGroup> {
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    groups
}
