//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Render sizes as `12.3K` instead of raw unit counts
    pub human_sizes: bool,
}
