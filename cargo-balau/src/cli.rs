//! Command-line interface definitions for `cargo-balau`.

use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};

/// Name cargo passes as the first argument when run as `cargo balau`.
const SUBCOMMAND: &str = "balau";

/// Parsed CLI arguments for `cargo-balau`.
///
/// Every setting except `--config` and `-v` can also come from the
/// configuration file or `BALAU_*` environment variables; flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "cargo-balau")]
#[command(about = "Run the Balau unit test application of a CMake build tree")]
#[command(version)]
pub struct Args {
    /// Project build directory (defaults to Cargo's target directory).
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<Utf8PathBuf>,
    /// CMake binary directory (defaults to `<build-dir>/cmake`).
    #[arg(long, value_name = "DIR")]
    pub cmake_dir: Option<Utf8PathBuf>,
    /// Directory receiving unit test reports
    /// (defaults to `<cmake-dir>/unitTestReports`).
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<Utf8PathBuf>,
    /// Test application path relative to the CMake directory
    /// (defaults to `bin/Tests`, then `Tests`).
    #[arg(long, value_name = "PATH")]
    pub app_path: Option<String>,
    /// Execution model passed to the test application.
    #[arg(short = 'e', long, value_name = "MODEL")]
    pub execution_model: Option<String>,
    /// `LD_LIBRARY_PATH` used when running the test application.
    #[arg(long, value_name = "PATHS")]
    pub ld_library_path: Option<String>,
    /// Configuration file (defaults to `balau.toml` when present).
    #[arg(long = "config", value_name = "FILE")]
    pub config_path: Option<Utf8PathBuf>,
    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    /// Test names to include or exclude (defaults to `*Test::*`).
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,
}

/// Drops the `balau` argument cargo inserts when invoked as `cargo balau`.
///
/// # Examples
///
/// ```
/// use cargo_balau::cli::strip_cargo_subcommand;
///
/// let argv = strip_cargo_subcommand(["cargo-balau", "balau", "-v"].map(std::ffi::OsString::from));
/// assert_eq!(argv, ["cargo-balau", "-v"].map(std::ffi::OsString::from));
/// ```
pub fn strip_cargo_subcommand<I>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = argv.into_iter().collect();
    if args.get(1).is_some_and(|arg| arg == SUBCOMMAND) {
        args.remove(1);
    }
    args
}

/// Parses the process arguments, accepting both `cargo balau` and direct
/// `cargo-balau` invocation.
#[must_use]
pub fn parse() -> Args {
    Args::parse_from(strip_cargo_subcommand(std::env::args_os()))
}
