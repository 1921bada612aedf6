//! I/O diagnostics.
//!
//! `error_detail` renders an io::Error as the text that follows "...: " in a job
//! log line, with a platform-aware hint and the raw OS code when there is one.
//! `io_error_with_help` is the anyhow adapter for orchestration code:
//!
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Error text plus hint, e.g. "Permission denied (os error 13); check ownership and write permissions [os code: 13]".
pub fn error_detail(e: &io::Error) -> String {
    let mut msg = e.to_string();

    if let Some(code) = e.raw_os_error() {
        if let Some(hint) = os_hint(code) {
            msg.push_str("; ");
            msg.push_str(hint);
        }
        msg.push_str(&format!(" [os code: {code}]"));
    } else if let Some(hint) = kind_hint(e.kind()) {
        msg.push_str("; ");
        msg.push_str(hint);
    }

    msg
}

#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "check ownership and write permissions",
        libc::EXDEV => "cross-filesystem; atomic rename not possible",
        libc::EBUSY => "resource busy; ensure no other process is using it",
        libc::ENOENT => "path not found; it may have been removed by another process",
        libc::EEXIST => "already exists",
        libc::ENOTEMPTY => "directory not empty",
        libc::ENOSPC => "insufficient space on device",
        libc::EROFS => "read-only filesystem",
        libc::ENAMETOOLONG => "filename or path too long",
        libc::EMFILE | libc::ENFILE => "too many open files",
        _ => return None,
    };
    Some(hint)
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        5 => "access denied; check permissions",             // ERROR_ACCESS_DENIED
        17 => "not same device; cross-filesystem move",      // ERROR_NOT_SAME_DEVICE
        32 => "sharing violation; file is in use",           // ERROR_SHARING_VIOLATION
        2 | 3 => "path not found",                           // FILE / PATH NOT FOUND
        80 | 183 => "already exists",                        // ERROR_FILE_EXISTS / ALREADY_EXISTS
        112 => "insufficient disk space",                    // ERROR_DISK_FULL
        145 => "directory not empty",                        // ERROR_DIR_NOT_EMPTY
        206 => "filename or path too long",                  // ERROR_FILENAME_EXCED_RANGE
        _ => return None,
    };
    Some(hint)
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!("{} '{}': {}", op, path.display(), error_detail(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_fallback_hint() {
        let e = io::Error::from(io::ErrorKind::NotFound);
        assert!(error_detail(&e).contains("path not found"));
    }

    #[cfg(unix)]
    #[test]
    fn os_code_is_included() {
        let e = io::Error::from_raw_os_error(libc::ENOSPC);
        let msg = error_detail(&e);
        assert!(msg.contains("insufficient space"), "msg was: {msg}");
        assert!(msg.contains(&format!("[os code: {}]", libc::ENOSPC)));
    }

    #[test]
    fn anyhow_adapter_mentions_op_and_path() {
        let p = Path::new("/nonexistent/for/test");
        let err = io_error_with_help("open", p)(io::Error::from(io::ErrorKind::NotFound));
        let msg = err.to_string();
        assert!(msg.starts_with("open '/nonexistent/for/test'"));
        assert!(msg.contains("path not found"));
    }
}
