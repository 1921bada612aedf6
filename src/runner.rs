//! Job runners.
//!
//! `run_move` / `run_cleanup` read a job's paths under the registry guard, run the
//! unit of work with the guard released, write one terminal status back and clear
//! the job's `working` flag. `start_*` do the same on a dedicated, named thread.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::FinalizeError;
use crate::finalize::{JobLog, Relocator, TreeCleaner};
use crate::fs_ops::{Filesystem, LocalFs};
use crate::job::{CleanupStatus, JobId, JobPaths, JobRegistry, MoveStatus, StatusUpdate};
use crate::matcher::{ExtensionList, NamePredicate};
use crate::obfuscation::HeuristicClassifier;

pub type MoveHandle = JoinHandle<Result<MoveStatus, FinalizeError>>;
pub type CleanupHandle = JoinHandle<Result<CleanupStatus, FinalizeError>>;

/// Everything a runner needs; shared by reference or via `Arc` across job threads.
pub struct PostProcessor {
    config: Config,
    registry: Arc<dyn JobRegistry>,
    fs: Arc<dyn Filesystem>,
    classifier: Arc<dyn NamePredicate>,
}

impl PostProcessor {
    /// Local disk and the built-in obfuscation heuristic.
    pub fn new(config: Config, registry: Arc<dyn JobRegistry>) -> Self {
        Self {
            config,
            registry,
            fs: Arc::new(LocalFs),
            classifier: Arc::new(HeuristicClassifier),
        }
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn Filesystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn NamePredicate>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Relocate a job's files into its final directory.
    pub fn run_move(&self, id: JobId) -> Result<MoveStatus, FinalizeError> {
        let paths = self.read_paths(id)?;
        let log = JobLog::new(id, &paths.name, self.registry.as_ref());

        log.info(&format!("Moving completed files for {}", paths.name));

        let final_dir = paths
            .final_dir
            .clone()
            .or_else(|| self.config.build_final_dir(&paths.name));

        let moved_to = match final_dir {
            Some(final_dir) => {
                let relocator = Relocator::new(self.fs.as_ref(), self.classifier.as_ref(), &log);
                relocator
                    .relocate(&paths.dest_dir, &final_dir)
                    .then_some(final_dir)
            }
            None => {
                log.error(&FinalizeError::NoFinalDir(id).to_string());
                None
            }
        };

        let (status, update) = match moved_to {
            Some(dest_dir) => {
                log.info(&format!("Move for {} successful", paths.name));
                (MoveStatus::Success, StatusUpdate::Moved { dest_dir })
            }
            None => {
                log.error(&format!("Move for {} failed", paths.name));
                (MoveStatus::Failure, StatusUpdate::MoveFailed)
            }
        };

        let written = self.registry.write_status(id, update);
        self.registry.finish(id);
        written.map(|()| status)
    }

    /// Purge cleanup-list matches from the job's directory and, when set and
    /// different, its final directory.
    pub fn run_cleanup(&self, id: JobId) -> Result<CleanupStatus, FinalizeError> {
        let paths = self.read_paths(id)?;
        let log = JobLog::new(id, &paths.name, self.registry.as_ref());

        log.info(&format!("Cleaning up {}", paths.name));

        let list: ExtensionList = self.config.cleanup_list();
        let cleaner = TreeCleaner::new(self.fs.as_ref(), &list, &log);

        let mut outcome = cleaner.cleanup(&paths.dest_dir);
        if let Some(final_dir) = paths
            .final_dir
            .as_ref()
            .filter(|d| !self.same_directory(d, &paths.dest_dir))
        {
            outcome = outcome & cleaner.cleanup(final_dir);
        }
        debug!(job = %paths.name, ?outcome, "cleanup walk finished");

        let status = if !outcome.ok {
            log.error(&format!("Cleanup for {} failed", paths.name));
            CleanupStatus::Failure
        } else if outcome.any_deleted {
            log.info(&format!("Cleanup for {} successful", paths.name));
            CleanupStatus::Success
        } else {
            log.info(&format!("Nothing to cleanup for {}", paths.name));
            CleanupStatus::Success
        };

        let written = self.registry.write_status(id, StatusUpdate::Cleanup(status));
        self.registry.finish(id);
        written.map(|()| status)
    }

    /// Copy the job's paths out of the registry. A failed read still clears the
    /// job's `working` flag so the host never sees it stuck.
    fn read_paths(&self, id: JobId) -> Result<JobPaths, FinalizeError> {
        self.registry.read_job_paths(id).inspect_err(|e| {
            warn!(id = id.0, error = %e, "could not read job paths");
            self.registry.finish(id);
        })
    }

    fn same_directory(&self, a: &Path, b: &Path) -> bool {
        match (self.fs.canonical_path(a), self.fs.canonical_path(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }

    /// Run `run_move` on its own thread, named `move-<id>`.
    pub fn start_move_job(self: &Arc<Self>, id: JobId) -> io::Result<MoveHandle> {
        let this = Arc::clone(self);
        thread::Builder::new()
            .name(format!("move-{}", id.0))
            .spawn(move || this.run_move(id))
    }

    /// Run `run_cleanup` on its own thread, named `cleanup-<id>`.
    pub fn start_cleanup_job(self: &Arc<Self>, id: JobId) -> io::Result<CleanupHandle> {
        let this = Arc::clone(self);
        thread::Builder::new()
            .name(format!("cleanup-{}", id.0))
            .spawn(move || this.run_cleanup(id))
    }
}
