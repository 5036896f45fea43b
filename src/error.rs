//! Error types for transcript parsing and input loading

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions raised while loading or replaying a transcript.
///
/// Every variant aborts the run: a partially rebuilt tree cannot answer
/// the capacity question. Parse errors carry the 1-based input line, which
/// callers prefix to the message (see [`Error::line`]).
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot cd into '{name}': no such directory")]
    Navigation { name: String, line: usize },

    #[error("invalid size '{token}' for file '{name}': {source}")]
    InvalidSize {
        token: String,
        name: String,
        line: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("negative size '{token}' for file '{name}'")]
    NegativeSize {
        token: String,
        name: String,
        line: usize,
    },

    #[error("malformed listing entry '{entry}' (expected 'dir <name>' or '<size> <name>')")]
    MalformedEntry { entry: String, line: usize },

    #[error("cd without a target directory")]
    MissingCdTarget { line: usize },

    #[error("size of '{path}' does not fit in a 64-bit total")]
    SizeOverflow { path: String },

    #[error("cannot read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Line of the input the error points at, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Navigation { line, .. }
            | Error::InvalidSize { line, .. }
            | Error::NegativeSize { line, .. }
            | Error::MalformedEntry { line, .. }
            | Error::MissingCdTarget { line } => Some(*line),
            Error::SizeOverflow { .. } | Error::Io { .. } => None,
        }
    }
}
