//! Shared utility functions for output formatting

use termcolor::ColorChoice;

use crate::tree::{DirTree, NodeId};

/// One line of a directory listing: a child directory or a file.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Entry<'a> {
    Dir(&'a str, NodeId),
    File(&'a str, u64),
}

impl Entry<'_> {
    pub(crate) fn name(&self) -> &str {
        match self {
            Entry::Dir(name, _) | Entry::File(name, _) => name,
        }
    }
}

/// Children and files of one directory, sorted by name.
pub(crate) fn sorted_entries(tree: &DirTree, dir: NodeId) -> Vec<Entry<'_>> {
    let node = tree.node(dir);
    let mut entries: Vec<Entry> = node
        .children()
        .map(|(name, id)| Entry::Dir(name, id))
        .chain(node.files().map(|(name, size)| Entry::File(name, size)))
        .collect();
    entries.sort_by(|a, b| a.name().cmp(b.name()));
    entries
}

/// Prefix segment added below an entry: a bar while siblings follow.
pub fn continuation_segment(is_last: bool) -> &'static str {
    if is_last { "    " } else { "│   " }
}

/// Format a size to human-readable form using binary multiples.
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.1}G", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1}M", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1}K", size as f64 / KB as f64)
    } else {
        format!("{}B", size)
    }
}

/// Render a size either raw or human-readable.
pub fn display_size(size: u64, human: bool) -> String {
    if human {
        format_size(size)
    } else {
        size.to_string()
    }
}

pub fn color_choice(use_color: bool) -> ColorChoice {
    if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
