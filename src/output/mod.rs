//! Report and tree display
//!
//! - `config` - Output configuration types
//! - `utils` - Size rendering, sorted listings and tree prefixes
//! - `report` - The one-line capacity report
//! - `tree` - Tree view with per-directory totals
//! - `json` - JSON output

mod config;
mod json;
mod report;
mod tree;
mod utils;

pub use config::OutputConfig;
pub use json::{JsonNode, JsonOutput, NodeKind, print_json};
pub use report::{EXHAUSTED_MESSAGE, format_report, print_report};
pub use tree::TreeFormatter;
pub use utils::{display_size, format_size};
