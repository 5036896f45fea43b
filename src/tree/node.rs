//! Directory tree arena
//!
//! Directories live in a flat `Vec` and refer to each other by `NodeId`.
//! Parents are optional links (the root has none), children are owned by
//! name. Files are plain `name -> size` attributes on their directory.

use std::collections::HashMap;

use tracing::debug;

/// Name given to the root directory.
pub const ROOT_NAME: &str = "/";

/// Index of a directory inside a [`DirTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One directory: its name, parent link, child directories and files.
#[derive(Debug, Clone)]
pub struct DirNode {
    name: String,
    parent: Option<NodeId>,
    children: HashMap<String, NodeId>,
    files: HashMap<String, u64>,
}

impl DirNode {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: HashMap::new(),
            files: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Child directories, in map order.
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Files directly inside this directory, in map order.
    pub fn files(&self) -> impl Iterator<Item = (&str, u64)> {
        self.files.iter().map(|(name, size)| (name.as_str(), *size))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Sum of the files directly owned by this directory, or `None` when
    /// the sum does not fit in a `u64`.
    pub fn own_file_size(&self) -> Option<u64> {
        self.files
            .values()
            .try_fold(0u64, |total, &size| total.checked_add(size))
    }
}

/// A rooted directory tree rebuilt from a transcript.
///
/// Nodes are only ever appended. Replacing a child with a same-named
/// directory detaches the old subtree: its nodes stay in the arena but are
/// unreachable from the root, and every traversal here starts at the root.
#[derive(Debug, Clone)]
pub struct DirTree {
    nodes: Vec<DirNode>,
}

impl DirTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![DirNode::new(ROOT_NAME, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node. Ids are only handed out by this tree, so lookups of
    /// ids from the same tree always succeed.
    pub fn node(&self, id: NodeId) -> &DirNode {
        &self.nodes[id.0]
    }

    /// Parent of `id`, or `id` itself when it is the root.
    pub fn navigate_to_parent(&self, id: NodeId) -> NodeId {
        self.node(id).parent.unwrap_or(id)
    }

    /// Child directory `name` of `id`, if one was registered.
    pub fn navigate_to_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id).children.get(name).copied()
    }

    /// Create directory `name` under `parent`, replacing any existing
    /// same-named child together with its subtree.
    pub fn add_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DirNode::new(name, Some(parent)));

        let replaced = self.nodes[parent.0].children.insert(name.to_string(), id);
        if replaced.is_some() {
            debug!(
                parent = %self.path_of(parent),
                name,
                "directory registered twice, previous subtree dropped"
            );
        }
        id
    }

    /// Record file `name` with `size` under `dir`. Returns the previous
    /// size when the file was already listed.
    pub fn add_file(&mut self, dir: NodeId, name: &str, size: u64) -> Option<u64> {
        self.nodes[dir.0].files.insert(name.to_string(), size)
    }

    /// Resolve a slash-separated path such as `/a/b` starting at the root.
    pub fn resolve(&self, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self.root(), |id, part| self.navigate_to_child(id, part))
    }

    /// Absolute path of a directory, `/` for the root.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            parts.push(self.node(current).name.as_str());
            current = parent;
        }
        if parts.is_empty() {
            return ROOT_NAME.to_string();
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }

    /// Every directory reachable from the root, root first.
    pub fn directories(&self) -> Vec<NodeId> {
        self.descendants(self.root())
    }

    /// `id` and every directory below it, in pre-order: each directory
    /// comes before all of its descendants. Walks with an explicit stack,
    /// so depth is bounded by memory rather than the call stack.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            found.push(id);
            stack.extend(self.node(id).children.values().copied());
        }
        found
    }

    /// Number of directories reachable from the root, the root included.
    pub fn dir_count(&self) -> usize {
        self.directories().len()
    }

    /// Number of files in reachable directories.
    pub fn file_count(&self) -> usize {
        self.directories()
            .into_iter()
            .map(|id| self.node(id).file_count())
            .sum()
    }
}

impl Default for DirTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_only_root() {
        let tree = DirTree::new();
        let root = tree.node(tree.root());
        assert_eq!(root.name(), "/");
        assert!(root.is_root());
        assert_eq!(tree.dir_count(), 1);
        assert_eq!(tree.file_count(), 0);
    }

    #[test]
    fn test_parent_of_root_is_root() {
        let tree = DirTree::new();
        assert_eq!(tree.navigate_to_parent(tree.root()), tree.root());
    }

    #[test]
    fn test_navigation_between_parent_and_child() {
        let mut tree = DirTree::new();
        let root = tree.root();
        let a = tree.add_child(root, "a");
        let b = tree.add_child(a, "b");

        assert_eq!(tree.navigate_to_child(root, "a"), Some(a));
        assert_eq!(tree.navigate_to_child(a, "b"), Some(b));
        assert_eq!(tree.navigate_to_parent(b), a);
        assert_eq!(tree.navigate_to_parent(a), root);
        assert_eq!(tree.navigate_to_child(root, "b"), None);
    }

    #[test]
    fn test_duplicate_child_replaces_subtree() {
        let mut tree = DirTree::new();
        let root = tree.root();
        let first = tree.add_child(root, "a");
        tree.add_child(first, "nested");
        tree.add_file(first, "f", 10);

        let second = tree.add_child(root, "a");
        assert_ne!(first, second);
        assert_eq!(tree.navigate_to_child(root, "a"), Some(second));
        assert_eq!(tree.node(second).child_count(), 0);
        assert_eq!(tree.dir_count(), 2);
        assert_eq!(tree.file_count(), 0);
    }

    #[test]
    fn test_duplicate_file_replaces_size() {
        let mut tree = DirTree::new();
        let root = tree.root();
        assert_eq!(tree.add_file(root, "f", 10), None);
        assert_eq!(tree.add_file(root, "f", 25), Some(10));
        assert_eq!(tree.node(root).own_file_size(), Some(25));
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn test_own_file_size_overflow_is_none() {
        let mut tree = DirTree::new();
        let root = tree.root();
        tree.add_file(root, "a", u64::MAX);
        assert_eq!(tree.node(root).own_file_size(), Some(u64::MAX));
        tree.add_file(root, "b", 1);
        assert_eq!(tree.node(root).own_file_size(), None);
    }

    #[test]
    fn test_descendants_lists_parents_first() {
        let mut tree = DirTree::new();
        let root = tree.root();
        let a = tree.add_child(root, "a");
        let b = tree.add_child(a, "b");
        let c = tree.add_child(root, "c");

        let order = tree.descendants(root);
        assert_eq!(order.len(), 4);
        let pos = |id| order.iter().position(|&n| n == id).unwrap();
        assert_eq!(pos(root), 0);
        assert!(pos(a) < pos(b));
        assert!(order.contains(&c));
        assert_eq!(tree.descendants(a), vec![a, b]);
    }

    #[test]
    fn test_deep_chain_walk() {
        let mut tree = DirTree::new();
        let mut current = tree.root();
        for _ in 0..200_000 {
            current = tree.add_child(current, "d");
        }
        assert_eq!(tree.dir_count(), 200_001);
        assert_eq!(tree.navigate_to_parent(current), tree.descendants(tree.root())[199_999]);
    }

    #[test]
    fn test_same_name_under_different_parents() {
        let mut tree = DirTree::new();
        let root = tree.root();
        let a = tree.add_child(root, "a");
        let inner = tree.add_child(a, "a");
        assert_ne!(a, inner);
        assert_eq!(tree.resolve("/a/a"), Some(inner));
        assert_eq!(tree.dir_count(), 3);
    }

    #[test]
    fn test_resolve_and_path_of() {
        let mut tree = DirTree::new();
        let root = tree.root();
        let a = tree.add_child(root, "a");
        let e = tree.add_child(a, "e");

        assert_eq!(tree.resolve("/"), Some(root));
        assert_eq!(tree.resolve(""), Some(root));
        assert_eq!(tree.resolve("/a/e"), Some(e));
        assert_eq!(tree.resolve("a/e/"), Some(e));
        assert_eq!(tree.resolve("/missing"), None);

        assert_eq!(tree.path_of(root), "/");
        assert_eq!(tree.path_of(e), "/a/e");
    }
}
