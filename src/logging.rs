//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout for the report.
//! `SHELLTREE_LOG` takes an `EnvFilter` directive and wins over `-v`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive such as `shelltree=debug`.
pub const LOG_ENV: &str = "SHELLTREE_LOG";

/// Level used when `SHELLTREE_LOG` is unset.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(
    verbosity: u8,
    use_color: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .try_init()
}
