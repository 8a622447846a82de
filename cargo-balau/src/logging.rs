//! Log subscriber setup for the binary.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Builds the filter for `verbosity` repeated `-v` flags.
///
/// Without `-v`, `RUST_LOG` is honoured and `info` is the fallback so the
/// forwarded test output stays visible. One `-v` selects `debug`, more select
/// `trace`.
#[must_use]
pub fn filter_for(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs a stderr `fmt` subscriber filtered for `verbosity`.
///
/// Does nothing when a global subscriber is already installed.
pub fn init(verbosity: u8) {
    let _unused = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
}
