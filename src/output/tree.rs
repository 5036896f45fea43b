//! Tree formatter for the rebuilt directory tree
//!
//! Draws the tree with `├──` / `└──` connectors. Directories show their
//! total size, files their own size. Entries are sorted by name.

use std::io;

use termcolor::{Color, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::sizes::DirectorySizes;
use crate::tree::DirTree;

use super::config::OutputConfig;
use super::utils::{Entry, color_choice, continuation_segment, display_size, sorted_entries};

/// A directory whose entries are being drawn.
struct Frame<'a> {
    entries: Vec<Entry<'a>>,
    next: usize,
    /// Length of the shared prefix while drawing this directory's entries.
    prefix_len: usize,
}

/// Formatter for the whole tree with per-directory totals.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render to a plain string (no colors).
    pub fn format(&self, tree: &DirTree, sizes: &DirectorySizes) -> String {
        let mut out = NoColor::new(Vec::new());
        // Writing into a Vec cannot fail
        let _ = self.write_tree(&mut out, tree, sizes);
        String::from_utf8_lossy(&out.into_inner()).into_owned()
    }

    pub fn print(&self, tree: &DirTree, sizes: &DirectorySizes) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(color_choice(self.config.use_color));
        self.write_tree(&mut stdout, tree, sizes)
    }

    /// Draw the tree depth-first with an explicit stack of open directories.
    fn write_tree<W: WriteColor>(
        &self,
        out: &mut W,
        tree: &DirTree,
        sizes: &DirectorySizes,
    ) -> io::Result<()> {
        let root = tree.root();
        self.write_dir_name(out, tree.node(root).name())?;
        self.write_size(out, sizes.size_of(root).unwrap_or_default())?;
        writeln!(out)?;

        let mut dir_count = 0;
        let mut file_count = 0;
        let mut prefix = String::new();
        let mut stack = vec![Frame {
            entries: sorted_entries(tree, root),
            next: 0,
            prefix_len: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&entry) = frame.entries.get(frame.next) else {
                stack.pop();
                if let Some(parent) = stack.last() {
                    prefix.truncate(parent.prefix_len);
                }
                continue;
            };
            frame.next += 1;
            let is_last = frame.next == frame.entries.len();
            let connector = if is_last { "└── " } else { "├── " };
            write!(out, "{}{}", prefix, connector)?;

            match entry {
                Entry::File(name, size) => {
                    write!(out, "{}", name)?;
                    self.write_size(out, size)?;
                    writeln!(out)?;
                    file_count += 1;
                }
                Entry::Dir(name, id) => {
                    self.write_dir_name(out, name)?;
                    self.write_size(out, sizes.size_of(id).unwrap_or_default())?;
                    writeln!(out)?;
                    dir_count += 1;

                    prefix.push_str(continuation_segment(is_last));
                    stack.push(Frame {
                        entries: sorted_entries(tree, id),
                        next: 0,
                        prefix_len: prefix.len(),
                    });
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "{} directories, {} files", dir_count, file_count)?;
        Ok(())
    }

    fn write_dir_name<W: WriteColor>(&self, out: &mut W, name: &str) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        write!(out, "{}", name)?;
        out.reset()
    }

    fn write_size<W: WriteColor>(&self, out: &mut W, size: u64) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(out, " ({})", display_size(size, self.config.human_sizes))?;
        out.reset()
    }
}
