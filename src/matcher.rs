//! Filename predicates.
//!
//! [`NamePredicate`] is the seam for every "does this name qualify?" decision
//! (extension cleanup, obfuscation). [`ExtensionList`] implements the user's
//! cleanup list: tokens separated by `,` or `;`, trimmed, matched
//! case-insensitively as a filename suffix. Tokens containing `*` or `?` are
//! compiled into a case-insensitive glob set and matched against the whole
//! filename instead.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

use crate::errors::FinalizeError;

/// Single-capability strategy: classify a bare filename.
pub trait NamePredicate: Send + Sync {
    fn matches(&self, name: &str) -> bool;
}

/// Adapts a closure into a [`NamePredicate`].
pub struct FnPredicate<F>(pub F);

impl<F> NamePredicate for FnPredicate<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, name: &str) -> bool {
        (self.0)(name)
    }
}

#[derive(Debug, Clone)]
pub struct ExtensionList {
    tokens: Vec<String>,
    masks: GlobSet,
}

impl ExtensionList {
    pub const SEPARATORS: &'static [char] = &[',', ';'];

    /// Lenient parse: masks that fail to compile are logged and ignored.
    /// Use [`ExtensionList::try_parse`] to reject them instead.
    pub fn parse(list: &str) -> Self {
        let tokens = split_tokens(list);

        let mut builder = GlobSetBuilder::new();
        for tok in tokens.iter().filter(|t| is_mask(t)) {
            match compile_mask(tok) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => warn!(pattern = %tok, error = %e, "ignoring invalid cleanup mask"),
            }
        }
        let masks = builder.build().unwrap_or_else(|e| {
            warn!(error = %e, "cleanup masks could not be combined; ignoring them");
            GlobSet::empty()
        });

        Self { tokens, masks }
    }

    /// Strict parse: the first mask that is not a valid glob is an error.
    pub fn try_parse(list: &str) -> Result<Self, FinalizeError> {
        for tok in split_tokens(list).iter().filter(|t| is_mask(t)) {
            compile_mask(tok).map_err(|e| FinalizeError::InvalidConfig {
                field: "ext_cleanup",
                reason: e.to_string(),
            })?;
        }
        Ok(Self::parse(list))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl NamePredicate for ExtensionList {
    fn matches(&self, name: &str) -> bool {
        if self.masks.is_match(name) {
            return true;
        }
        let lower = name.to_lowercase();
        self.tokens
            .iter()
            .any(|tok| !is_mask(tok) && lower.ends_with(tok.as_str()))
    }
}

fn split_tokens(list: &str) -> Vec<String> {
    list.split(ExtensionList::SEPARATORS)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn is_mask(tok: &str) -> bool {
    tok.contains(['*', '?'])
}

fn compile_mask(tok: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(tok).case_insensitive(true).build()
}
