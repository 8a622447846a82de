//! Filesystem helpers shared across `cargo-balau` modules.

use std::io::ErrorKind;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, File};

use crate::error::RunnerError;

/// Opens a directory if it exists, returning `None` when the path is missing
/// or is not a directory.
pub fn open_optional_dir(path: &Utf8Path) -> Result<Option<Dir>, RunnerError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(Some(dir)),
        Err(err) if is_absent(&err) => Ok(None),
        Err(err) => Err(RunnerError::Io {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Returns whether `name` inside `dir` is a regular file that can be opened
/// for reading.
///
/// Symbolic links are followed wherever they point, so `bin/Tests` may link
/// to an executable elsewhere in the build tree. Missing or unreadable
/// entries report `false`.
pub fn is_readable_file(dir: &Utf8Path, name: &str) -> Result<bool, RunnerError> {
    let path = dir.join(name);
    let file = match File::open_ambient(&path, ambient_authority()) {
        Ok(file) => file,
        Err(err) if is_absent(&err) || err.kind() == ErrorKind::PermissionDenied => {
            return Ok(false);
        }
        Err(source) => return Err(RunnerError::Io { path, source }),
    };
    match file.metadata() {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(source) => Err(RunnerError::Io { path, source }),
    }
}

/// Makes `path` absolute against the current working directory without
/// touching the filesystem.
pub fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, RunnerError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let resolved = std::path::absolute(path).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    utf8(resolved)
}

/// Converts a standard path into a UTF-8 path.
pub fn utf8(path: impl AsRef<Path>) -> Result<Utf8PathBuf, RunnerError> {
    Utf8PathBuf::from_path_buf(path.as_ref().to_path_buf()).map_err(RunnerError::NonUtf8Path)
}

fn is_absent(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}
