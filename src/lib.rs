//! Core library for `post_finalize`.
//!
//! Finishes a completed download job in two independent units of work:
//! - relocation: move everything from the job's intermediate directory into its
//!   final directory, avoiding name collisions and renaming obfuscated files;
//! - cleanup: recursively delete files matching the configured extension list.
//!
//! Both run against a [`JobRegistry`] through [`PostProcessor`], one thread per job.

pub mod cli;
pub mod config;
pub mod errors;
pub mod finalize;
pub mod fs_ops;
pub mod job;
pub mod matcher;
pub mod obfuscation;
pub mod output;
pub mod platform;
pub mod runner;

pub use config::{Config, LogLevel, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use errors::FinalizeError;
pub use finalize::{CleanupOutcome, JobLog, Relocator, TreeCleaner};
pub use fs_ops::{Filesystem, LocalFs};
pub use job::{CleanupStatus, Job, JobId, JobQueue, JobRegistry, MoveStatus};
pub use matcher::{ExtensionList, NamePredicate};
pub use obfuscation::HeuristicClassifier;
pub use runner::PostProcessor;

/// Convenience re-exports for embedding the runners.
pub mod prelude {
    pub use crate::config::{Config, LogLevel, default_config_path};
    pub use crate::errors::FinalizeError as Error;
    pub use crate::fs_ops::{Filesystem, LocalFs};
    pub use crate::job::{CleanupStatus, Job, JobId, JobQueue, JobRegistry, MoveStatus, StatusUpdate};
    pub use crate::matcher::{ExtensionList, FnPredicate, NamePredicate};
    pub use crate::runner::PostProcessor;
}
