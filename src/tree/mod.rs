//! Directory tree rebuilt from a shell transcript
//!
//! - `DirTree`: arena of directories with parent links and upserting children
//! - `TreeBuilder`: replays `$ cd` / `$ ls` blocks, moving a cursor through the tree

mod builder;
mod node;

pub use builder::{COMMAND_PREFIX, TreeBuilder, load_transcript, parse_transcript};
pub use node::{DirNode, DirTree, NodeId, ROOT_NAME};
