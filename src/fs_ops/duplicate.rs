//! Collision-free destination names.
//!
//! Policy: keep the requested name when it is free, otherwise append " (n)"
//! before the extension for n = 2.. until nothing in the directory has that name.
//!
//! Notes:
//! - The answer reflects the directory contents at call time only. Jobs own
//!   distinct directory trees, so no lock is taken.

use std::path::{Path, PathBuf};
use tracing::trace;

use super::Filesystem;

// Conservative filename limits (bytes).
#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240; // leave headroom for legacy MAX_PATH
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255; // typical POSIX/EXT limits

const MAX_TRIES: u64 = 10_000;

/// Return `dir/<name>` or `dir/<stem> (n)<ext>`, whichever is first free.
///
/// Examples:
/// - "movie.mkv" -> "movie (2).mkv", "movie (3).mkv", ...
/// - ".env" -> ".env (2)"
/// - "archive.tar.gz" -> "archive.tar (2).gz"
pub fn unique_name(fs: &dyn Filesystem, dir: &Path, name: &str) -> PathBuf {
    let (stem, ext) = split_name(name);

    let first = build_name_with_suffix(stem, ext, "");
    let candidate = dir.join(&first);
    if !fs.entry_exists(&candidate) {
        return candidate;
    }

    for n in 2..=MAX_TRIES {
        let new_name = build_name_with_suffix(stem, ext, &format!(" ({n})"));
        let candidate = dir.join(&new_name);
        if !fs.entry_exists(&candidate) {
            return candidate;
        }
        if n == 4 {
            trace!(name, dir = %dir.display(), "duplicate: multiple collisions, still searching");
        }
    }

    // Pathologically crowded directory.
    dir.join(build_name_with_suffix(stem, ext, " (final)"))
}

/// Split into stem and extension the way `Path::file_stem`/`extension` do:
/// a leading dot belongs to the stem, so ".env" has no extension.
fn split_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

/// Truncate the stem if needed so `stem + suffix + ["." + ext]` fits MAX_FILENAME_LEN.
fn build_name_with_suffix(stem: &str, ext: Option<&str>, suffix: &str) -> String {
    let overhead = suffix.len() + ext.map(|e| e.len() + 1).unwrap_or(0);
    let budget = MAX_FILENAME_LEN.saturating_sub(overhead);

    let stem = if stem.len() > budget {
        let mut end = budget;
        while end > 0 && !stem.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 { "f" } else { &stem[..end] }
    } else {
        stem
    };

    let mut out = String::with_capacity(stem.len() + overhead);
    out.push_str(stem);
    out.push_str(suffix);
    if let Some(e) = ext {
        out.push('.');
        out.push_str(e);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::LocalFs;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn free_name_is_kept() {
        let td = tempdir().unwrap();
        let p = unique_name(&LocalFs, td.path(), "file.txt");
        assert_eq!(p, td.path().join("file.txt"));
    }

    #[test]
    fn collisions_increment_suffix() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("file.txt"), b"1").unwrap();
        fs::write(td.path().join("file (2).txt"), b"2").unwrap();
        let p = unique_name(&LocalFs, td.path(), "file.txt");
        assert_eq!(p, td.path().join("file (3).txt"));
    }

    #[test]
    fn directory_entries_count_as_collisions() {
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("Show")).unwrap();
        let p = unique_name(&LocalFs, td.path(), "Show");
        assert_eq!(p, td.path().join("Show (2)"));
    }

    #[test]
    fn dotfile_and_multi_extension() {
        let td = tempdir().unwrap();
        fs::write(td.path().join(".env"), b"a").unwrap();
        fs::write(td.path().join("archive.tar.gz"), b"a").unwrap();
        assert_eq!(
            unique_name(&LocalFs, td.path(), ".env"),
            td.path().join(".env (2)")
        );
        assert_eq!(
            unique_name(&LocalFs, td.path(), "archive.tar.gz"),
            td.path().join("archive.tar (2).gz")
        );
    }

    #[test]
    fn long_names_are_truncated_to_fit() {
        let long = format!("{}.mkv", "é".repeat(200));
        let built = build_name_with_suffix(&long[..long.len() - 4], Some("mkv"), " (2)");
        assert!(built.len() <= MAX_FILENAME_LEN);
        assert!(built.ends_with(" (2).mkv"));
    }
}
