//! Resolution of the CMake directory and the test application inside it.

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::fs_helpers::{absolute, is_readable_file, open_optional_dir};

/// File name of the test application when no app path is configured.
pub const DEFAULT_APP_NAME: &str = "Tests";

/// Directory under the CMake directory searched first for the default app.
const BIN_DIR: &str = "bin";

/// Where the test application lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLocation {
    /// Absolute directory containing the executable; also its working
    /// directory.
    pub directory: Utf8PathBuf,
    /// File name of the executable.
    pub name: String,
}

impl AppLocation {
    /// Full path of the executable.
    #[must_use]
    pub fn executable(&self) -> Utf8PathBuf {
        self.directory.join(&self.name)
    }
}

/// Resolves the CMake binary directory.
///
/// Uses the configured CMake directory when set. Otherwise appends `cmake` to
/// the configured build directory, or to the directory produced by
/// `default_build_dir` (Cargo's target directory in the binary).
///
/// # Errors
///
/// Propagates failures from `default_build_dir`.
pub fn resolve_cmake_dir<F>(
    config: &RunnerConfig,
    default_build_dir: F,
) -> Result<Utf8PathBuf, RunnerError>
where
    F: FnOnce() -> Result<Utf8PathBuf, RunnerError>,
{
    if let Some(cmake_dir) = &config.cmake_dir {
        return Ok(cmake_dir.clone());
    }
    let build_dir = match &config.build_dir {
        Some(dir) => dir.clone(),
        None => default_build_dir()?,
    };
    Ok(build_dir.join("cmake"))
}

/// Finds the test application under `cmake_dir`.
///
/// Without an app path, `bin/Tests` is preferred over `Tests`. With an app
/// path, it is split on `/` and `\` with trailing empty components dropped;
/// a single component names a file
/// directly inside `cmake_dir`, several components name a file under the
/// corresponding subdirectory, which must exist.
///
/// # Errors
///
/// Returns [`RunnerError::ExecutableNotFound`], [`RunnerError::AppParentNotFound`]
/// or [`RunnerError::AppNotFound`] when the expected files are missing.
pub fn locate_app(cmake_dir: &Utf8Path, app_path: Option<&str>) -> Result<AppLocation, RunnerError> {
    let mut components: Vec<&str> = app_path
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(|path| path.split(['/', '\\']).collect())
        .unwrap_or_default();
    while components.last().is_some_and(|component| component.is_empty()) {
        components.pop();
    }

    let Some((name, parents)) = components.split_last() else {
        return locate_default_app(cmake_dir);
    };

    if parents.is_empty() {
        return Ok(AppLocation {
            directory: absolute(cmake_dir)?,
            name: (*name).to_owned(),
        });
    }

    let parent = parents
        .iter()
        .fold(cmake_dir.to_path_buf(), |dir, component| dir.join(component));
    if open_optional_dir(&parent)?.is_none() {
        return Err(RunnerError::AppParentNotFound(parent));
    }
    if !is_readable_file(&parent, name)? {
        return Err(RunnerError::AppNotFound(parent.join(name)));
    }
    Ok(AppLocation {
        directory: absolute(&parent)?,
        name: (*name).to_owned(),
    })
}

fn locate_default_app(cmake_dir: &Utf8Path) -> Result<AppLocation, RunnerError> {
    let name = format!("{DEFAULT_APP_NAME}{}", std::env::consts::EXE_SUFFIX);
    let bin = cmake_dir.join(BIN_DIR);
    for candidate in [bin.as_path(), cmake_dir] {
        if is_readable_file(candidate, &name)? {
            return Ok(AppLocation {
                directory: absolute(candidate)?,
                name,
            });
        }
    }
    Err(RunnerError::ExecutableNotFound {
        bin,
        cmake: cmake_dir.to_path_buf(),
    })
}
