//! Typed error definitions for post_finalize.
//! Covers the few failures that cross the library boundary; per-file filesystem
//! failures never do (they are logged against the job instead).

use std::path::PathBuf;
use thiserror::Error;

use crate::job::JobId;

#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("Unknown job: {0}")]
    UnknownJob(JobId),

    #[error("Job registry lock poisoned")]
    RegistryPoisoned,

    #[error("Job {0} has no final directory and no dest_base is configured")]
    NoFinalDir(JobId),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Config path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl FinalizeError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            FinalizeError::UnknownJob(_) => 10,
            FinalizeError::RegistryPoisoned => 11,
            FinalizeError::NoFinalDir(_) => 12,
            FinalizeError::InvalidConfig { .. } => 20,
            FinalizeError::NotADirectory(_) => 21,
        }
    }
}
