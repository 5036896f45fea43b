//! Transcript replay: rebuilds a `DirTree` from `$ cd` / `$ ls` blocks

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

use super::node::{DirTree, NodeId};

/// Marker that starts every command in a transcript.
pub const COMMAND_PREFIX: &str = "$ ";

/// Listing token that introduces a subdirectory.
const DIR_TOKEN: &str = "dir";

/// Replays a transcript against a fresh tree.
///
/// The builder owns the cursor for the duration of one [`build`](Self::build)
/// call and hands back only the finished tree.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: DirTree,
    cursor: NodeId,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let tree = DirTree::new();
        let cursor = tree.root();
        Self { tree, cursor }
    }

    /// Consume the transcript and return the rebuilt tree.
    ///
    /// Stops at the first malformed block; no partial tree is returned.
    pub fn build(mut self, log: &str) -> Result<DirTree> {
        let mut line = 1;
        for block in log.split(COMMAND_PREFIX) {
            if !block.trim().is_empty() {
                self.apply_block(block, line)?;
            }
            line += block.matches('\n').count();
        }
        debug!(
            directories = self.tree.dir_count(),
            files = self.tree.file_count(),
            "transcript replayed"
        );
        Ok(self.tree)
    }

    fn apply_block(&mut self, block: &str, line: usize) -> Result<()> {
        let mut lines = block.lines();
        let command_line = lines.next().unwrap_or_default().trim();
        let (command, argument) = match command_line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (command_line, ""),
        };
        trace!(line, command, argument, "command");

        if command == "cd" {
            if lines.any(|rest| !rest.trim().is_empty()) {
                warn!(line, "ignoring output after cd");
            }
            return self.change_dir(argument, line);
        }

        if command != "ls" {
            debug!(line, command, "unknown command, reading its output as a listing");
        }
        for (offset, entry) in lines.enumerate() {
            let entry = entry.trim_end();
            if entry.is_empty() {
                continue;
            }
            self.record_entry(entry, line + 1 + offset)?;
        }
        Ok(())
    }

    fn change_dir(&mut self, target: &str, line: usize) -> Result<()> {
        self.cursor = match target {
            "" => return Err(Error::MissingCdTarget { line }),
            "/" => self.tree.root(),
            ".." => self.tree.navigate_to_parent(self.cursor),
            name => self
                .tree
                .navigate_to_child(self.cursor, name)
                .ok_or_else(|| Error::Navigation {
                    name: name.to_string(),
                    line,
                })?,
        };
        Ok(())
    }

    fn record_entry(&mut self, entry: &str, line: usize) -> Result<()> {
        let malformed = || Error::MalformedEntry {
            entry: entry.to_string(),
            line,
        };

        let (token, name) = entry.split_once(' ').ok_or_else(malformed)?;
        let name = name.trim();
        if token.is_empty() || name.is_empty() {
            return Err(malformed());
        }

        if token == DIR_TOKEN {
            self.tree.add_child(self.cursor, name);
            return Ok(());
        }

        if !looks_numeric(token) {
            return Err(malformed());
        }
        let size = parse_size(token, name, line)?;
        if let Some(previous) = self.tree.add_file(self.cursor, name, size) {
            debug!(line, name, previous, size, "file listed twice, keeping latest size");
        }
        Ok(())
    }
}

/// Replay a whole transcript into a new tree.
pub fn parse_transcript(log: &str) -> Result<DirTree> {
    TreeBuilder::new().build(log)
}

/// Read a transcript file into memory.
pub fn load_transcript(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Tokens that were meant as a size, even if they fail to parse.
fn looks_numeric(token: &str) -> bool {
    token
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit())
}

fn parse_size(token: &str, name: &str, line: usize) -> Result<u64> {
    token.parse::<u64>().map_err(|source| {
        let negative = token
            .strip_prefix('-')
            .is_some_and(|digits| digits.parse::<u64>().is_ok());
        if negative {
            Error::NegativeSize {
                token: token.to_string(),
                name: name.to_string(),
                line,
            }
        } else {
            Error::InvalidSize {
                token: token.to_string(),
                name: name.to_string(),
                line,
                source,
            }
        }
    })
}
