//! TreeCleaner: depth-first purge of files whose names match the cleanup list.
//!
//! Directories are descended into but never deleted, whatever their name. A failed
//! deletion marks the walk as not ok and iteration carries on with the siblings.

use std::ops::BitAnd;
use std::path::Path;

use crate::fs_ops::{Filesystem, error_detail};
use crate::matcher::NamePredicate;

use super::report::JobLog;

/// Aggregated result of one or more cleanup walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOutcome {
    /// No required deletion failed.
    pub ok: bool,
    /// At least one matching file was found, deleted or not.
    pub any_deleted: bool,
}

impl Default for CleanupOutcome {
    fn default() -> Self {
        Self {
            ok: true,
            any_deleted: false,
        }
    }
}

/// AND on `ok`, OR on `any_deleted`.
impl BitAnd for CleanupOutcome {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            ok: self.ok && rhs.ok,
            any_deleted: self.any_deleted || rhs.any_deleted,
        }
    }
}

pub struct TreeCleaner<'a> {
    fs: &'a dyn Filesystem,
    extensions: &'a dyn NamePredicate,
    log: &'a JobLog<'a>,
}

impl<'a> TreeCleaner<'a> {
    pub fn new(fs: &'a dyn Filesystem, extensions: &'a dyn NamePredicate, log: &'a JobLog<'a>) -> Self {
        Self { fs, extensions, log }
    }

    pub fn cleanup(&self, dir: &Path) -> CleanupOutcome {
        let mut outcome = CleanupOutcome::default();

        for entry in self.fs.list_entries(dir) {
            let path = dir.join(&entry);

            if self.fs.directory_exists(&path) {
                outcome = outcome & self.cleanup(&path);
                continue;
            }

            let filename = entry.to_string_lossy();
            if !self.extensions.matches(&filename) {
                continue;
            }

            self.log.info(&format!("Deleting file {filename}"));
            if let Err(e) = self.fs.delete_file(&path) {
                self.log.error(&format!(
                    "Could not delete file {}: {}",
                    path.display(),
                    error_detail(&e)
                ));
                outcome.ok = false;
            }
            outcome.any_deleted = true;
        }

        outcome
    }
}
