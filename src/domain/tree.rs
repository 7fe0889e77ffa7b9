//! Owned link tree produced by the builder

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use termtree::Tree as TermTree;

/// Name of the synthetic root node.
pub const ROOT_NAME: &str = "Root";

/// A link materialized into tree position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Name of the immediate parent, None for root-level nodes
    #[serde(skip)]
    pub parent_name: Option<String>,
    /// Children in the order they were resolved
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, url: Option<String>, parent_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            url,
            parent_name,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(url) => write!(f, "{} ({})", self.name, url),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Forest of links hanging off a synthetic root.
///
/// The root is never part of the input data: it has no url and no parent,
/// and its children are exactly the records without a parent reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: TreeNode,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Tree {
    pub fn new(children: Vec<TreeNode>) -> Self {
        Self {
            root: TreeNode {
                name: ROOT_NAME.to_string(),
                url: None,
                parent_name: None,
                children,
            },
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Root-level nodes.
    pub fn children(&self) -> &[TreeNode] {
        &self.root.children
    }

    /// Iterates all materialized nodes breadth-first, excluding the root.
    pub fn iter(&self) -> BreadthFirst<'_> {
        BreadthFirst {
            queue: self.root.children.iter().collect(),
        }
    }

    /// Number of materialized nodes, excluding the root.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Number of levels below the synthetic root.
    pub fn depth(&self) -> usize {
        fn depth_of(node: &TreeNode) -> usize {
            1 + node.children.iter().map(depth_of).max().unwrap_or(0)
        }
        self.root.children.iter().map(depth_of).max().unwrap_or(0)
    }

    pub fn find(&self, name: &str) -> Option<&TreeNode> {
        self.iter().find(|node| node.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Names of all childless nodes in breadth-first order.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|node| !node.has_children())
            .map(|node| node.name.as_str())
            .collect()
    }

    pub fn to_termtree(&self) -> TermTree<String> {
        fn convert(node: &TreeNode) -> TermTree<String> {
            TermTree::new(node.to_string()).with_leaves(node.children.iter().map(convert))
        }
        convert(&self.root)
    }
}

pub struct BreadthFirst<'a> {
    queue: VecDeque<&'a TreeNode>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.children.iter());
        Some(node)
    }
}
