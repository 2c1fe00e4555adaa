//! File-system helpers shared by the pipeline and the commands.
use std::io;
use std::path::{Path, PathBuf};

/// Make `path` absolute against the current directory without touching the
/// file system. Falls back to `path` unchanged if the current directory is
/// unavailable.
#[must_use]
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve a path given on the command line.
///
/// Existing paths are canonicalized (symlinks resolved, no `\\?\` prefix on
/// Windows); anything else, such as a glob pattern, is only made absolute.
#[must_use]
pub fn resolve_cli_path(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| absolutize(path))
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Replace the contents of `path` with `contents`, creating parent
/// directories first.
///
/// # Errors
///
/// Returns an error if a parent directory cannot be created or the file
/// cannot be written.
pub fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, contents)
}
