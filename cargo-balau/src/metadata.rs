//! Cargo metadata lookup for the default build directory.

use camino::Utf8PathBuf;
use cargo_metadata::MetadataCommand;

use crate::error::RunnerError;

/// Returns the target directory of the workspace containing the current
/// directory.
///
/// # Errors
///
/// Returns [`RunnerError::Metadata`] when `cargo metadata` fails, for example
/// outside a Cargo workspace.
pub fn cargo_target_directory() -> Result<Utf8PathBuf, RunnerError> {
    let mut command = MetadataCommand::new();
    command.no_deps();
    let metadata = command.exec()?;
    tracing::debug!(target_directory = %metadata.target_directory, "resolved cargo target directory");
    Ok(metadata.target_directory)
}
