//! Default "strongly obfuscated" filename heuristic.
//!
//! A name is obfuscated when its stem (name without the final extension) is:
//! - exactly 32 hex digits (an md5-looking name), or
//! - 40+ characters made only of hex digits and dots, or
//! - 30+ alphanumerics mixing lowercase, uppercase and digits, or
//! - prefixed with `abc.xyz` (a common poster placeholder).

use crate::matcher::NamePredicate;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn is_strongly_obfuscated(name: &str) -> bool {
        let stem = match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        };

        if stem.len() == 32 && stem.chars().all(|c| c.is_ascii_hexdigit()) {
            return true;
        }

        if stem.len() >= 40 && stem.chars().all(|c| c.is_ascii_hexdigit() || c == '.') {
            return true;
        }

        if stem.len() >= 30
            && stem.chars().all(|c| c.is_ascii_alphanumeric())
            && stem.chars().any(|c| c.is_ascii_lowercase())
            && stem.chars().any(|c| c.is_ascii_uppercase())
            && stem.chars().any(|c| c.is_ascii_digit())
        {
            return true;
        }

        stem.starts_with("abc.xyz")
    }
}

impl NamePredicate for HeuristicClassifier {
    fn matches(&self, name: &str) -> bool {
        Self::is_strongly_obfuscated(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_like_names() {
        assert!(HeuristicClassifier.matches("b082fa0beaa644d3aa01045d5b8d0b36.mkv"));
        assert!(HeuristicClassifier.matches("B082FA0BEAA644D3AA01045D5B8D0B36"));
    }

    #[test]
    fn long_hex_with_dots() {
        assert!(HeuristicClassifier.matches(
            "0675e29e9abfd2.f7d069dab0b853283cc.3b5d5a8f0e7c1b.mkv"
        ));
    }

    #[test]
    fn mixed_case_random_alnum() {
        assert!(HeuristicClassifier.matches("Xq7Tz9LmB2vR8kN4pW6yH3jD5sF1gA0c.mp4"));
        // all lowercase: ambiguous, not strong
        assert!(!HeuristicClassifier.matches("thisisaverylongbutplainlowercasename.mp4"));
    }

    #[test]
    fn placeholder_prefix() {
        assert!(HeuristicClassifier.matches("abc.xyz.a4c5b1.mkv"));
    }

    #[test]
    fn ordinary_names_pass() {
        assert!(!HeuristicClassifier.matches("Show.S01E01.720p.mkv"));
        assert!(!HeuristicClassifier.matches("video.mkv"));
        assert!(!HeuristicClassifier.matches(".hidden"));
    }
}
