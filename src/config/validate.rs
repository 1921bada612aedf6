//! Config validation logic.
//! Normalizes the destination base and refuses cleanup lists that would purge
//! everything or carry a mask that is not a valid glob.

use anyhow::{Result, bail};
use std::fs;
use tracing::{debug, info};

use super::types::Config;
use crate::errors::FinalizeError;
use crate::fs_ops::io_error_with_help;
use crate::matcher::ExtensionList;

/// Tokens that match every file and would empty a job directory.
const CATCH_ALL_TOKENS: &[&str] = &["*", "*.*"];

/// Validate the config and canonicalize `dest_base` (created when missing).
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    if let Some(base) = cfg.dest_base.as_ref() {
        if base.exists() {
            if !base.is_dir() {
                return Err(FinalizeError::NotADirectory(base.clone()).into());
            }
        } else {
            fs::create_dir_all(base).map_err(io_error_with_help("create dest_base", base))?;
            info!("Created dest_base directory: {}", base.display());
        }
        let real = dunce::canonicalize(base).map_err(io_error_with_help("resolve dest_base", base))?;
        debug!(dest_base = %real.display(), "dest_base normalized");
        cfg.dest_base = Some(real);
    }

    let list = ExtensionList::try_parse(&cfg.ext_cleanup)?;
    if let Some(tok) = list
        .tokens()
        .iter()
        .find(|t| CATCH_ALL_TOKENS.contains(&t.as_str()))
    {
        bail!(FinalizeError::InvalidConfig {
            field: "ext_cleanup",
            reason: format!("'{tok}' would delete every file"),
        });
    }

    Ok(())
}
