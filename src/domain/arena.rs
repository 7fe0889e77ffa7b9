use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::tree::{Tree, TreeNode, ROOT_NAME};

/// Data payload for arena nodes representing links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub name: String,
    pub url: Option<String>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Node in the arena-based hierarchy under construction.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the synthetic root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in attach order
    pub children: Vec<Index>,
}

/// Arena-backed working tree used while resolving parent references.
///
/// Children are attached by index, so a parent can keep growing while
/// other nodes are looked up by name. Once resolution is done the arena is
/// converted into an owned [`Tree`].
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<ArenaNode>,
    root: Index,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    /// Creates an arena holding only the synthetic root.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = Arena::with_capacity(capacity.max(1));
        let root = arena.insert(ArenaNode {
            data: NodeData {
                name: ROOT_NAME.to_string(),
                url: None,
            },
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    /// Number of nodes attached below the root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a node and appends it to `parent`'s children.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Index) -> Index {
        let node_idx = self.arena.insert(ArenaNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode> {
        self.arena.get(idx)
    }

    /// Converts the arena into an owned tree, consuming it.
    #[instrument(level = "trace", skip(self))]
    pub fn into_tree(mut self) -> Tree {
        let root = self.root;
        let children = self
            .arena
            .get(root)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        let children = children
            .into_iter()
            .filter_map(|child| self.take_subtree(child, None))
            .collect();
        Tree::new(children)
    }

    fn take_subtree(&mut self, idx: Index, parent_name: Option<&str>) -> Option<TreeNode> {
        let node = self.arena.remove(idx)?;
        let mut tree_node = TreeNode::new(
            node.data.name,
            node.data.url,
            parent_name.map(str::to_string),
        );
        let name = tree_node.name.clone();
        tree_node.children = node
            .children
            .into_iter()
            .filter_map(|child| self.take_subtree(child, Some(&name)))
            .collect();
        Some(tree_node)
    }
}
