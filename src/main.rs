//! CLI entry point for shelltree

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use shelltree::logging::init_logging;
use shelltree::{
    CapacityConfig, CapacityReport, DEFAULT_CAPACITY, DEFAULT_REQUIRED_FREE, Error, JsonNode,
    JsonOutput, OutputConfig, TreeFormatter, compute_sizes, load_transcript, parse_transcript,
    print_json, print_report,
};
use tracing::info;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "shelltree")]
#[command(about = "Rebuild a directory tree from a cd/ls transcript and find the smallest directory to delete")]
#[command(version)]
struct Args {
    /// Transcript of `$ cd` / `$ ls` commands and their output
    #[arg(default_value = "prod.txt")]
    path: PathBuf,

    /// Total capacity of the device
    #[arg(long = "capacity", value_name = "SIZE", default_value_t = DEFAULT_CAPACITY)]
    capacity: u64,

    /// Free space required after deleting one directory
    #[arg(long = "required", value_name = "SIZE", default_value_t = DEFAULT_REQUIRED_FREE)]
    required: u64,

    /// Print the rebuilt tree with per-directory sizes
    #[arg(short = 't', long = "tree")]
    tree: bool,

    /// Show sizes in human-readable form in the tree (K, M, G)
    #[arg(short = 'H', long = "human", requires = "tree")]
    human: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Print `err` against the input it came from and exit, compiler style:
/// `shelltree: <path>:<line>: <message>` when the line is known.
fn fail(path: &Path, err: &Error) -> ! {
    match err.line() {
        Some(line) => eprintln!("shelltree: {}:{}: {}", path.display(), line, err),
        None => eprintln!("shelltree: {}: {}", path.display(), err),
    }
    process::exit(1);
}

fn main() {
    let args = Args::parse();
    let use_color = should_use_color(args.color);

    if let Err(e) = init_logging(args.verbose, use_color) {
        eprintln!("shelltree: warning: logging disabled: {}", e);
    }

    let log = load_transcript(&args.path).unwrap_or_else(|e| {
        eprintln!("shelltree: {}", e);
        process::exit(1);
    });

    let tree = parse_transcript(&log).unwrap_or_else(|e| fail(&args.path, &e));
    info!(
        directories = tree.dir_count(),
        files = tree.file_count(),
        "tree rebuilt"
    );

    let pass = compute_sizes(&tree).unwrap_or_else(|e| fail(&args.path, &e));
    let config = CapacityConfig {
        capacity: args.capacity,
        required_free: args.required,
    };
    let report = CapacityReport::new(&config, &pass);
    info!(
        root_size = report.root_size,
        needed = report.needed,
        smallest_deletable = ?report.smallest_deletable,
        "capacity query answered"
    );

    let result = if args.json {
        let output = JsonOutput {
            report: &report,
            directory_sizes: pass.sizes.as_slice(),
            tree: args
                .tree
                .then(|| JsonNode::from_tree(&tree, &pass.sizes)),
        };
        print_json(&output)
    } else {
        let tree_result = if args.tree {
            let formatter = TreeFormatter::new(OutputConfig {
                use_color,
                human_sizes: args.human,
            });
            formatter.print(&tree, &pass.sizes).map(|()| println!())
        } else {
            Ok(())
        };
        tree_result.and_then(|()| print_report(&report, use_color))
    };

    if let Err(e) = result {
        eprintln!("shelltree: error writing output: {}", e);
        process::exit(1);
    }
}
