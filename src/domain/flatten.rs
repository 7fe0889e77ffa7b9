//! Breadth-first projection of a tree into render entries.

use std::collections::VecDeque;

use serde::Serialize;
use tracing::instrument;

use crate::domain::tree::{Tree, TreeNode};

/// One linearized node, ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub has_children: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    /// Nesting level, 1 for root-level nodes
    pub depth: usize,
}

impl RenderEntry {
    fn from_node(node: &TreeNode, depth: usize) -> Self {
        Self {
            name: node.name.clone(),
            url: node.url.clone(),
            has_children: node.has_children(),
            parent_name: node.parent_name.clone(),
            depth,
        }
    }
}

/// Linearizes `tree` breadth-first, starting below the synthetic root.
///
/// Every node of one level is emitted before any node of the next, so a
/// presenter can create each container before its children get appended.
/// Children are enqueued in stored order.
#[instrument(level = "debug", skip_all)]
pub fn flatten(tree: &Tree) -> Vec<RenderEntry> {
    let mut entries = Vec::new();
    let mut queue: VecDeque<(&TreeNode, usize)> =
        tree.children().iter().map(|node| (node, 1)).collect();

    while let Some((node, depth)) = queue.pop_front() {
        entries.push(RenderEntry::from_node(node, depth));
        for child in &node.children {
            queue.push_back((child, depth + 1));
        }
    }

    entries
}
