//! Shelltree - rebuild a directory tree from a shell transcript and find
//! the smallest directory whose deletion frees enough space

pub mod error;
pub mod logging;
pub mod output;
pub mod query;
pub mod sizes;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use output::{
    JsonNode, JsonOutput, NodeKind, OutputConfig, TreeFormatter, print_json, print_report,
};
pub use query::{
    CapacityConfig, CapacityReport, DEFAULT_CAPACITY, DEFAULT_REQUIRED_FREE,
    find_smallest_deletable,
};
pub use sizes::{DirectorySizes, SizePass, SizeRecorder, compute_size, compute_sizes};
pub use tree::{DirNode, DirTree, NodeId, TreeBuilder, load_transcript, parse_transcript};
