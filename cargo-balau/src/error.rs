//! Error types for `cargo-balau`.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while resolving, launching, or supervising the test
/// application.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Layered configuration could not be merged or deserialized.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found at {0}")]
    ConfigNotFound(Utf8PathBuf),

    /// `cargo metadata` could not report the target directory.
    #[error("cargo metadata failed: {0}")]
    Metadata(#[from] cargo_metadata::Error),

    /// Neither a build directory nor a CMake directory could be determined.
    #[error("build directory was not supplied; pass --build-dir or --cmake-dir")]
    BuildDirMissing,

    /// A path could not be represented as UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// Neither `bin/Tests` nor `Tests` exists under the CMake directory.
    #[error("No Tests executable found in either {bin} or {cmake} directories.")]
    ExecutableNotFound {
        /// The `bin` directory that was searched first.
        bin: Utf8PathBuf,
        /// The CMake directory that was searched second.
        cmake: Utf8PathBuf,
    },

    /// The directory named by the configured app path does not exist.
    #[error("No Tests app parent directory found at {0}")]
    AppParentNotFound(Utf8PathBuf),

    /// The executable named by the configured app path does not exist.
    #[error("No Tests executable found at {0}")]
    AppNotFound(Utf8PathBuf),

    /// The test application could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the child's output or waiting for it failed.
    #[error("failed to read test application output: {0}")]
    Output(#[source] std::io::Error),

    /// The test application exited with a non-zero status.
    #[error("The unit test application process failed with exit status {0}")]
    ProcessFailed(i32),

    /// The test application ended without an exit code, typically by signal.
    #[error("The unit test application process was terminated: {0}")]
    Terminated(String),
}

impl From<figment::Error> for RunnerError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
