//! Library interface for `cargo-balau`.
//!
//! Finds a Balau unit test application inside a CMake build tree and runs it
//! with an execution model, a report directory, and test name patterns,
//! forwarding its output to the log and failing when it exits non-zero.

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod fs_helpers;
pub mod locate;
pub mod logging;
pub mod metadata;
pub mod plan;
pub mod process;

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::locate::{locate_app, resolve_cmake_dir};
use crate::plan::{RunPlan, execution_model};

/// Resolves the test application for `config` and runs it to completion.
///
/// # Errors
///
/// Returns a [`RunnerError`] when the application cannot be located or
/// started, or when it exits unsuccessfully.
pub fn run(config: &RunnerConfig) -> Result<(), RunnerError> {
    let cmake_dir = resolve_cmake_dir(config, metadata::cargo_target_directory)?;
    let location = locate_app(&cmake_dir, config.app_path.as_deref())?;

    tracing::debug!(
        cmake_dir = %cmake_dir,
        app_dir = %location.directory,
        app_name = %location.name,
        execution_model = %execution_model(config),
        "resolved test application"
    );

    let plan = RunPlan::new(config, &cmake_dir, &location)?;
    tracing::debug!(args = ?plan.args, "launching test application");
    process::run(&plan)
}
