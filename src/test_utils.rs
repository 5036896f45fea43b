//! Test utilities for generating transcripts.
//!
//! This module is only compiled for tests and benchmarks.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a transcript one command at a time.
#[derive(Debug, Default, Clone)]
pub struct TranscriptBuilder {
    text: String,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cd(mut self, target: &str) -> Self {
        let _ = writeln!(self.text, "$ cd {}", target);
        self
    }

    /// Emit `$ ls` followed by `dir` lines and then `<size> <name>` lines.
    pub fn ls(mut self, dirs: &[&str], files: &[(u64, &str)]) -> Self {
        self.text.push_str("$ ls\n");
        for dir in dirs {
            let _ = writeln!(self.text, "dir {}", dir);
        }
        for (size, name) in files {
            let _ = writeln!(self.text, "{} {}", size, name);
        }
        self
    }

    /// Append raw text, for malformed input.
    pub fn raw(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// Transcript of a balanced tree: `fanout` directories per level, `depth`
/// levels deep, each directory holding `files_per_dir` files.
pub fn generate_transcript(depth: usize, fanout: usize, files_per_dir: usize) -> String {
    fn visit(
        builder: TranscriptBuilder,
        level: usize,
        depth: usize,
        fanout: usize,
        files: usize,
    ) -> TranscriptBuilder {
        let dirs: Vec<String> = if level < depth {
            (0..fanout).map(|i| format!("d{}", i)).collect()
        } else {
            Vec::new()
        };
        let dir_refs: Vec<&str> = dirs.iter().map(String::as_str).collect();
        let file_entries: Vec<(u64, String)> = (0..files)
            .map(|i| (((level + 1) * 1000 + i) as u64, format!("f{}.dat", i)))
            .collect();
        let file_refs: Vec<(u64, &str)> = file_entries
            .iter()
            .map(|(size, name)| (*size, name.as_str()))
            .collect();

        let mut builder = builder.ls(&dir_refs, &file_refs);
        for dir in &dirs {
            builder = visit(builder.cd(dir), level + 1, depth, fanout, files).cd("..");
        }
        builder
    }

    visit(TranscriptBuilder::new().cd("/"), 0, depth, fanout, files_per_dir).build()
}

/// Transcript of a single chain of directories `depth` levels below the
/// root. Every directory, the root included, holds one file of `file_size`.
pub fn generate_nested_transcript(depth: usize, file_size: u64) -> String {
    let mut text = String::from("$ cd /\n");
    for level in 0..=depth {
        text.push_str("$ ls\n");
        if level < depth {
            text.push_str("dir d\n");
        }
        let _ = writeln!(text, "{} f", file_size);
        if level < depth {
            text.push_str("$ cd d\n");
        }
    }
    text
}

/// A transcript written to a temporary directory.
///
/// The directory is removed when dropped.
pub struct TestTranscript {
    dir: TempDir,
    path: PathBuf,
}

impl TestTranscript {
    pub fn new(content: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("transcript.txt");
        fs::write(&path, content).expect("Failed to write transcript");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
