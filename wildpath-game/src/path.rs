//! Branch navigation over a character's journey graph.
//!
//! Traversal is a pure function of (graph, current node, choice
//! outcome). Movement timing is the caller's concern; nothing here
//! knows about delays or animation.

use crate::data::PathNode;

/// Outcome classification of the triggering choice. Branch selection
/// is deliberately two-way; richer outcome dimensions would slot in
/// here without touching the traversal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOutcome {
    /// Health impact >= 0: take the primary branch.
    Favorable,
    /// Health impact < 0: take the secondary branch.
    Unfavorable,
}

impl BranchOutcome {
    #[must_use]
    pub const fn from_health_impact(health: i32) -> Self {
        if health >= 0 {
            Self::Favorable
        } else {
            Self::Unfavorable
        }
    }

    const fn branch_index(self) -> usize {
        match self {
            Self::Favorable => 0,
            Self::Unfavorable => 1,
        }
    }
}

/// Resolve the id of the node the avatar moves to next.
///
/// Well-formed content never hits the fallbacks: terminal nodes sit at
/// the end of the list and every `next` id resolves. For malformed
/// content the navigator degrades to sequential movement bounded by
/// the last node instead of stalling or panicking.
#[must_use]
pub fn next_node_id(path: &[PathNode], current_id: u32, outcome: BranchOutcome) -> u32 {
    if path.is_empty() {
        return current_id;
    }
    let last_index = path.len() - 1;
    let Some(current_index) = path.iter().position(|n| n.id == current_id) else {
        log::warn!("navigator: current node {current_id} not in path, holding position");
        return current_id;
    };
    let node = &path[current_index];

    if node.next.is_empty() {
        let fallback = last_index.min(current_index + 1);
        if fallback != current_index {
            log::warn!(
                "navigator: terminal node {current_id} is not last in path, advancing sequentially"
            );
        }
        return path[fallback].id;
    }

    let mut branch = outcome.branch_index();
    if branch >= node.next.len() {
        branch = 0;
    }
    let target = node.next[branch];
    if path.iter().any(|n| n.id == target) {
        target
    } else {
        log::warn!("navigator: node {current_id} links to unknown node {target}, falling back");
        path[last_index.min(current_index + 1)].id
    }
}
