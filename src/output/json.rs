//! JSON output formatting

use std::io;

use serde::Serialize;

use crate::query::CapacityReport;
use crate::sizes::DirectorySizes;
use crate::tree::DirTree;

use super::utils::{Entry, sorted_entries};

/// Whether a node is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Dir,
    File,
}

/// One node of the rebuilt tree in the flat JSON listing.
///
/// Nodes refer to their directory by `parent` id, so the document stays
/// flat however deeply the tree is nested. The root has no parent.
#[derive(Debug, Clone, Serialize)]
pub struct JsonNode {
    pub id: usize,
    pub parent: Option<usize>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub size: u64,
}

impl JsonNode {
    /// Flatten the tree reachable from the root, in pre-order with the
    /// entries of each directory sorted by name. Ids are list positions.
    pub fn from_tree(tree: &DirTree, sizes: &DirectorySizes) -> Vec<JsonNode> {
        let root = tree.root();
        let mut nodes = vec![JsonNode {
            id: 0,
            parent: None,
            kind: NodeKind::Dir,
            name: tree.node(root).name().to_string(),
            size: sizes.size_of(root).unwrap_or_default(),
        }];

        // Pending entries with their parent's id, reversed so the
        // alphabetically first entry is popped first.
        let mut stack: Vec<(Entry, usize)> = sorted_entries(tree, root)
            .into_iter()
            .rev()
            .map(|entry| (entry, 0))
            .collect();

        while let Some((entry, parent)) = stack.pop() {
            let id = nodes.len();
            let (kind, size) = match entry {
                Entry::File(_, size) => (NodeKind::File, size),
                Entry::Dir(_, dir) => {
                    stack.extend(
                        sorted_entries(tree, dir)
                            .into_iter()
                            .rev()
                            .map(|child| (child, id)),
                    );
                    (NodeKind::Dir, sizes.size_of(dir).unwrap_or_default())
                }
            };
            nodes.push(JsonNode {
                id,
                parent: Some(parent),
                kind,
                name: entry.name().to_string(),
                size,
            });
        }

        nodes
    }
}

/// Full JSON document: the report, optionally with the flattened tree attached.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    #[serde(flatten)]
    pub report: &'a CapacityReport,
    /// Every directory size, ascending
    pub directory_sizes: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<JsonNode>>,
}

/// Print any serializable value as pretty-printed JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
