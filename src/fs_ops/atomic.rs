//! Move helper.
//! - Tries a plain rename first (atomic on the same filesystem).
//! - On a cross-device error, copies the entry (recursively for directories) and
//!   removes the source. A partially copied destination is removed on failure.
//! - On Unix, best-effort fsync of the destination directory after a rename.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub fn move_path(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => {
            #[cfg(unix)]
            if let Some(parent) = dst.parent() {
                // Ignore fsync errors; the rename itself already succeeded.
                let _ = fsync_dir(parent);
            }
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            debug!(src = %src.display(), dst = %dst.display(), "rename crosses filesystems; copying");
            copy_then_remove(src, dst)
        }
        Err(e) => Err(e),
    }
}

fn copy_then_remove(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(src)?;
    if meta.file_type().is_dir() {
        if let Err(e) = copy_tree(src, dst) {
            let _ = fs::remove_dir_all(dst);
            return Err(e);
        }
        fs::remove_dir_all(src)
    } else {
        if let Err(e) = copy_one(src, dst, &meta) {
            let _ = fs::remove_file(dst);
            return Err(e);
        }
        fs::remove_file(src)
    }
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(rel);
        let ft = entry.file_type();
        if ft.is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            let meta = entry.path().symlink_metadata()?;
            copy_one(entry.path(), &target, &meta)?;
        }
    }
    Ok(())
}

fn copy_one(src: &Path, dst: &Path, meta: &fs::Metadata) -> io::Result<()> {
    if meta.file_type().is_symlink() {
        #[cfg(unix)]
        {
            let target = fs::read_link(src)?;
            return std::os::unix::fs::symlink(target, dst);
        }
        #[cfg(not(unix))]
        {
            warn!(path = %src.display(), "copying symlink target instead of the link");
        }
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// EXDEV / ERROR_NOT_SAME_DEVICE.
fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = fs::File::open(dir)?;
    f.sync_all().inspect_err(|e| {
        warn!(dir = %dir.display(), error = %e, "fsync of directory failed");
    })
}
