//! Directory size computation and the per-directory size recorder
//!
//! One pass over the tree computes every directory's total size. Each total
//! is handed to a `SizeRecorder`, which is finalized into a sorted
//! `DirectorySizes` snapshot for the capacity query.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::tree::{DirTree, NodeId};

/// Accumulates directory sizes during a single size pass.
#[derive(Debug, Default)]
pub struct SizeRecorder {
    /// Sum of every recorded size. Nested directories count once per
    /// ancestor, so this is larger than the root size for any nested tree.
    /// Diagnostic only; saturates at `u64::MAX`.
    total: u64,
    sizes: Vec<u64>,
    by_node: HashMap<NodeId, u64>,
}

impl SizeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the total size of one directory.
    pub fn record(&mut self, node: NodeId, size: u64) {
        self.total = self.total.saturating_add(size);
        self.sizes.push(size);
        self.by_node.insert(node, size);
    }

    pub fn overall_usage(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Sort the recorded sizes and freeze them.
    pub fn finalize(self) -> DirectorySizes {
        let mut sorted = self.sizes;
        sorted.sort_unstable();
        DirectorySizes {
            sorted,
            recorded_total: self.total,
            by_node: self.by_node,
        }
    }
}

/// Every directory's size, ascending.
#[derive(Debug, Clone, Default)]
pub struct DirectorySizes {
    sorted: Vec<u64>,
    recorded_total: u64,
    by_node: HashMap<NodeId, u64>,
}

impl DirectorySizes {
    pub fn as_slice(&self) -> &[u64] {
        &self.sorted
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn recorded_total(&self) -> u64 {
        self.recorded_total
    }

    /// Total size computed for a specific directory.
    pub fn size_of(&self, node: NodeId) -> Option<u64> {
        self.by_node.get(&node).copied()
    }

    /// Smallest recorded size that is at least `minimum`.
    pub fn smallest_at_least(&self, minimum: u64) -> Option<u64> {
        let index = self.sorted.partition_point(|&size| size < minimum);
        self.sorted.get(index).copied()
    }
}

/// Result of one size pass over a tree.
#[derive(Debug, Clone)]
pub struct SizePass {
    pub root_size: u64,
    pub sizes: DirectorySizes,
}

/// Total size of `node`: its own files plus every child's total.
///
/// Every directory below `node` is recorded, children before their parent.
/// Fails with [`Error::SizeOverflow`] when a total does not fit in a `u64`.
pub fn compute_size(tree: &DirTree, node: NodeId, recorder: &mut SizeRecorder) -> Result<u64> {
    let mut totals: HashMap<NodeId, u64> = HashMap::new();

    // Reversed pre-order visits every child before its parent.
    for id in tree.descendants(node).into_iter().rev() {
        let dir = tree.node(id);
        let overflow = || Error::SizeOverflow {
            path: tree.path_of(id),
        };
        let mut size = dir.own_file_size().ok_or_else(overflow)?;
        for (_, child) in dir.children() {
            let child_size = totals.remove(&child).unwrap_or_default();
            size = size.checked_add(child_size).ok_or_else(overflow)?;
        }
        recorder.record(id, size);
        totals.insert(id, size);
    }

    Ok(totals.remove(&node).unwrap_or_default())
}

/// Run the size pass from the root and return the root size together with
/// the sorted sizes of every reachable directory.
pub fn compute_sizes(tree: &DirTree) -> Result<SizePass> {
    let mut recorder = SizeRecorder::new();
    let root_size = compute_size(tree, tree.root(), &mut recorder)?;
    tracing::debug!(
        root_size,
        directories = recorder.len(),
        recorded_total = recorder.overall_usage(),
        "size pass complete"
    );
    Ok(SizePass {
        root_size,
        sizes: recorder.finalize(),
    })
}
