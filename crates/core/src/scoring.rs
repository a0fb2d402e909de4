//! Section ranking by selection mass.

use tracing::debug;

use crate::article::{Article, Section};
use crate::node::TreeNode;
use crate::{Result, SectioError};

/// Pick the section with the largest selection mass.
///
/// Ties go to the section created first, so the result only depends on the
/// document, never on hashing.
///
/// # Errors
///
/// [`SectioError::EmptyDocument`] when the article holds no sections, or
/// when every section has zero mass because no paragraph carries text.
pub fn select_main_section<N: TreeNode>(article: &Article<N>) -> Result<&Section<N>> {
    let mut best: Option<&Section<N>> = None;
    for section in article.sections() {
        match best {
            Some(current) if current.selection_mass() >= section.selection_mass() => {}
            _ => best = Some(section),
        }
    }

    let winner = best
        .filter(|section| section.selection_mass() > 0)
        .ok_or(SectioError::EmptyDocument)?;
    debug!(section = winner.id(), mass = winner.selection_mass(), "selected main section");
    Ok(winner)
}

/// Sections ordered by descending selection mass, ties kept in creation order.
pub fn rank_sections<N: TreeNode>(article: &Article<N>) -> Vec<&Section<N>> {
    let mut ranked: Vec<&Section<N>> = article.sections().iter().collect();
    ranked.sort_by(|a, b| b.selection_mass().cmp(&a.selection_mass()));
    ranked
}
