//! Filesystem primitives consumed by the finalization core.
//!
//! Everything that touches the disk goes through [`Filesystem`] so the relocation
//! and cleanup policies can be exercised against a fault-injecting double.
//! [`LocalFs`] is the production implementation.

mod atomic;
mod duplicate;
mod helpers;
mod names;

pub use atomic::move_path;
pub use duplicate::unique_name;
pub use helpers::{error_detail, io_error_with_help};
pub use names::{file_extension, is_hidden, sanitize_name};

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Black-box filesystem operations. All calls are blocking.
pub trait Filesystem: Send + Sync {
    /// Direct children of `dir` (no `.`/`..`), sorted by name. An unreadable or
    /// missing directory yields nothing.
    fn list_entries<'a>(&'a self, dir: &Path) -> Box<dyn Iterator<Item = OsString> + 'a>;

    /// Rename `src` to `dst`, copying across filesystems when needed.
    fn move_entry(&self, src: &Path, dst: &Path) -> io::Result<()>;

    fn delete_file(&self, path: &Path) -> io::Result<()>;

    /// Remove `dir` and everything below it.
    fn delete_tree(&self, dir: &Path) -> io::Result<()>;

    /// True for real directories; symlinks are not followed.
    fn directory_exists(&self, path: &Path) -> bool;

    /// True if anything (including a dangling symlink) occupies `path`.
    fn entry_exists(&self, path: &Path) -> bool;

    /// `mkdir -p`.
    fn ensure_directory_tree(&self, path: &Path) -> io::Result<()>;

    /// Absolute path with symlinks, `.` and `..` resolved. `path` must exist.
    fn canonical_path(&self, path: &Path) -> io::Result<PathBuf>;
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl Filesystem for LocalFs {
    fn list_entries<'a>(&'a self, dir: &Path) -> Box<dyn Iterator<Item = OsString> + 'a> {
        // sort_by_file_name reads the whole directory before yielding, so callers may
        // rename inside `dir` while iterating without seeing their own results.
        let iter = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_os_string());
        Box::new(iter)
    }

    fn move_entry(&self, src: &Path, dst: &Path) -> io::Result<()> {
        move_path(src, dst)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn delete_tree(&self, dir: &Path) -> io::Result<()> {
        fs::remove_dir_all(dir)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|m| m.file_type().is_dir())
            .unwrap_or(false)
    }

    fn entry_exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn ensure_directory_tree(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn canonical_path(&self, path: &Path) -> io::Result<PathBuf> {
        dunce::canonicalize(path)
    }
}
