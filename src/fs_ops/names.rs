//! Filename helpers: validity sanitizing, extension extraction, hidden-file test.

/// Characters rejected by at least one common target filesystem.
const ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Make `raw` usable as a single path component on the target filesystem.
///
/// - Illegal and control characters become `_`.
/// - Trailing dots and spaces are trimmed (Windows silently drops them).
/// - An empty result, `.` or `..` becomes `_`.
pub fn sanitize_name(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| {
            if c.is_control() || ILLEGAL_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_end_matches(['.', ' ']);
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Substring from the last `.` (inclusive) to the end; empty when there is no dot.
///
/// `"movie.part1.rar"` -> `".rar"`, `"README"` -> `""`, `".env"` -> `".env"`.
pub fn file_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}

/// Dot-files are moved quietly; their failures are ignored.
#[inline]
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
