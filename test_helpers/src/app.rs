//! Fake test applications laid out inside a scratch CMake build tree.
//!
//! The launcher only needs an executable that accepts its arguments, so tests
//! stand in for a compiled test binary with a small shell script.
//!
//! # Examples
//!
//! ```no_run
//! use balau_test_helpers::app::BuildTree;
//!
//! let tree = BuildTree::new()?;
//! let app = tree.install_script("bin/Tests", "echo \"$@\"")?;
//! assert!(app.ends_with("cmake/bin/Tests"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Scratch directory holding a `cmake` binary directory.
#[derive(Debug)]
pub struct BuildTree {
    _dir: TempDir,
    build_dir: Utf8PathBuf,
}

impl BuildTree {
    /// Creates an empty tree with `<build>/cmake` present.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let build_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temp dir is not valid UTF-8: {}", path.display()))?;
        std::fs::create_dir_all(build_dir.join("cmake")).context("create cmake dir")?;
        Ok(Self {
            _dir: dir,
            build_dir,
        })
    }

    /// Root of the tree, playing the role of the project build directory.
    #[must_use]
    pub fn build_dir(&self) -> &Utf8Path {
        &self.build_dir
    }

    /// The `<build>/cmake` directory.
    #[must_use]
    pub fn cmake_dir(&self) -> Utf8PathBuf {
        self.build_dir.join("cmake")
    }

    /// Writes an executable `/bin/sh` script at `relative` under the cmake
    /// directory and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an error when the script or its parent directories cannot be
    /// written, or its permissions cannot be changed.
    pub fn install_script(&self, relative: &str, body: &str) -> Result<Utf8PathBuf> {
        let path = self.cmake_dir().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n"))
            .with_context(|| format!("write {path}"))?;
        make_executable(&path)?;
        Ok(path)
    }

    /// Writes a plain, non-executable file at `relative` under the cmake
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its parent directories cannot be
    /// written.
    pub fn install_file(&self, relative: &str) -> Result<Utf8PathBuf> {
        let path = self.cmake_dir().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        std::fs::write(&path, "").with_context(|| format!("write {path}"))?;
        Ok(path)
    }

    /// Creates a symbolic link at `relative` under the cmake directory that
    /// points at `target`, which is stored verbatim (relative or absolute).
    ///
    /// # Errors
    ///
    /// Returns an error when the link or its parent directories cannot be
    /// created.
    #[cfg(unix)]
    pub fn install_symlink(
        &self,
        relative: &str,
        target: impl AsRef<Utf8Path>,
    ) -> Result<Utf8PathBuf> {
        let path = self.cmake_dir().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        let target = target.as_ref();
        std::os::unix::fs::symlink(target, &path)
            .with_context(|| format!("link {path} -> {target}"))?;
        Ok(path)
    }
}

#[cfg(unix)]
fn make_executable(path: &Utf8Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)
        .with_context(|| format!("stat {path}"))?
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions).with_context(|| format!("chmod {path}"))
}

#[cfg(not(unix))]
fn make_executable(_path: &Utf8Path) -> Result<()> {
    Ok(())
}
