//! Recovery of paragraph-like elements missed by the primary pass.
//!
//! Runs after selection. Any unrecorded element of a recoverable kind whose
//! parent already keys a section is appended to that section. Membership is
//! decided by the element's `parent_id`, never by its own id.

use tracing::{debug, trace};

use crate::article::Article;
use crate::node::TreeNode;
use crate::paragraph::Paragraph;
use crate::walker::ElementRecord;

/// Append unrecorded elements of kind `tags` to existing sections.
///
/// Selection mass is left alone, so the selected section stays selected.
/// Returns the number of recovered paragraphs.
pub fn reconcile<N: TreeNode, S: AsRef<str>>(
    records: &[ElementRecord<N>], article: &mut Article<N>, tags: &[S],
) -> usize {
    let mut recovered = 0;

    for record in records {
        if !record.is_kind(tags) || article.contains_paragraph(record.id) {
            continue;
        }
        if article.section(record.parent_id).is_none() {
            continue;
        }
        if article.add_recovered(Paragraph::from_record(record)) {
            trace!(id = record.id, section = record.parent_id, "recovered paragraph");
            recovered += 1;
        }
    }

    debug!(recovered, "reconciled sections");
    recovered
}
