//! Relocator: move a job's files from the intermediate directory into its final
//! directory, then give obfuscated names a readable one.
//!
//! Result policy:
//! - Final directory cannot be created: nothing is moved, result is false.
//! - A non-hidden entry fails to move: logged, result becomes false, the batch continues.
//! - A hidden (dot) entry fails to move: silently ignored.
//! - Intermediate directory removal (only attempted when every move succeeded) and
//!   obfuscated renames are best-effort; their failures are logged only.
//! - Final and intermediate directory resolve to the same place: nothing is moved
//!   or deleted, only the rename pass runs.
//! - Final directory nested inside the intermediate one: the entry holding it is
//!   left alone and the intermediate directory is kept.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use tracing::debug;

use crate::fs_ops::{Filesystem, error_detail, file_extension, is_hidden, sanitize_name, unique_name};
use crate::matcher::NamePredicate;

use super::report::JobLog;

/// Technical files that keep their name even when it looks obfuscated.
pub const EXCLUDED_RENAME_EXTENSIONS: &[&str] = &[".par2", ".nzb", ".sfv", ".srr", ".srs"];

#[derive(Debug, PartialEq, Eq)]
enum Layout {
    Separate,
    Same,
    /// The final directory lives below this direct entry of the intermediate directory.
    FinalInside(OsString),
}

pub struct Relocator<'a> {
    fs: &'a dyn Filesystem,
    classifier: &'a dyn NamePredicate,
    log: &'a JobLog<'a>,
}

impl<'a> Relocator<'a> {
    pub fn new(fs: &'a dyn Filesystem, classifier: &'a dyn NamePredicate, log: &'a JobLog<'a>) -> Self {
        Self { fs, classifier, log }
    }

    /// Returns true iff `final_dir` exists (or was created) and every non-hidden entry moved.
    pub fn relocate(&self, inter_dir: &Path, final_dir: &Path) -> bool {
        if let Err(e) = self.fs.ensure_directory_tree(final_dir) {
            self.log.error(&format!(
                "Could not create directory {}: {}",
                final_dir.display(),
                error_detail(&e)
            ));
            return false;
        }

        let layout = self.layout(inter_dir, final_dir);
        if layout == Layout::Same {
            self.log.info(&format!(
                "Files for {} are already in {}",
                self.log.name(),
                final_dir.display()
            ));
            self.rename_obfuscated(final_dir);
            return true;
        }

        let holds_final = match &layout {
            Layout::FinalInside(entry) => Some(entry.as_os_str()),
            _ => None,
        };

        // The listing lives only inside move_files, so its handle is closed before
        // the intermediate directory is deleted.
        let ok = self.move_files(inter_dir, final_dir, holds_final);

        if holds_final.is_some() {
            self.log.info(&format!(
                "Keeping intermediate directory {}: it contains {}",
                inter_dir.display(),
                final_dir.display()
            ));
        } else if ok && let Err(e) = self.fs.delete_tree(inter_dir) {
            self.log.warn(&format!(
                "Could not delete intermediate directory {}: {}",
                inter_dir.display(),
                error_detail(&e)
            ));
        }

        self.rename_obfuscated(final_dir);

        ok
    }

    /// How the two directories relate on disk, compared by canonical path.
    /// An intermediate directory that cannot be resolved counts as separate.
    fn layout(&self, inter_dir: &Path, final_dir: &Path) -> Layout {
        let (Ok(inter), Ok(fin)) = (
            self.fs.canonical_path(inter_dir),
            self.fs.canonical_path(final_dir),
        ) else {
            return Layout::Separate;
        };

        if inter == fin {
            return Layout::Same;
        }
        match fin.strip_prefix(&inter).ok().and_then(|rest| rest.components().next()) {
            Some(first) => Layout::FinalInside(first.as_os_str().to_os_string()),
            None => Layout::Separate,
        }
    }

    fn move_files(&self, inter_dir: &Path, final_dir: &Path, holds_final: Option<&OsStr>) -> bool {
        let mut ok = true;

        for entry in self.fs.list_entries(inter_dir) {
            if holds_final == Some(entry.as_os_str()) {
                debug!(job = %self.log.name(), entry = ?entry, "entry contains the final directory; left in place");
                continue;
            }
            let filename = entry.to_string_lossy();
            let src = inter_dir.join(&entry);
            let dst = unique_name(self.fs, final_dir, &sanitize_name(&filename));
            let hidden = is_hidden(&filename);

            if !hidden {
                self.log.info(&format!(
                    "Moving file {} to {}",
                    filename,
                    final_dir.display()
                ));
            }

            match self.fs.move_entry(&src, &dst) {
                Ok(()) => {}
                Err(e) if hidden => {
                    debug!(job = %self.log.name(), src = %src.display(), error = %e, "hidden file not moved");
                }
                Err(e) => {
                    self.log.error(&format!(
                        "Could not move file {} to {}: {}",
                        src.display(),
                        dst.display(),
                        error_detail(&e)
                    ));
                    ok = false;
                }
            }
        }

        ok
    }

    /// Rename entries of `dir` the classifier flags to `<job name><original extension>`,
    /// disambiguated against the directory's current contents.
    fn rename_obfuscated(&self, dir: &Path) {
        let base = sanitize_name(self.log.name());
        let entries: Vec<OsString> = self.fs.list_entries(dir).collect();

        for entry in entries {
            let filename = entry.to_string_lossy();
            if !self.classifier.matches(&filename) {
                continue;
            }

            let candidate = format!("{base}{}", file_extension(&filename));
            if is_excluded_extension(&candidate) {
                debug!(job = %self.log.name(), file = %filename, "keeping name of technical file");
                continue;
            }
            if candidate == filename {
                continue;
            }

            let src = dir.join(&entry);
            let dst = unique_name(self.fs, dir, &candidate);
            match self.fs.move_entry(&src, &dst) {
                Ok(()) => {
                    debug!(job = %self.log.name(), src = %src.display(), dst = %dst.display(), "renamed obfuscated file");
                }
                Err(e) => {
                    self.log.error(&format!(
                        "Could not rename file {} to {}: {}",
                        src.display(),
                        dst.display(),
                        error_detail(&e)
                    ));
                }
            }
        }
    }
}

fn is_excluded_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    EXCLUDED_RENAME_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
