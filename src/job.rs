//! Job model and the guarded registry the runners talk to.
//!
//! The registry owns every job. Runners only ever:
//! - copy a [`JobPaths`] snapshot out (`read_job_paths`),
//! - store one terminal status (`write_status`),
//! - append job-attributed messages (`add_message`),
//! - clear the `working` flag (`finish`).
//!
//! Each call takes the lock for the span of a field copy or store; callers never
//! hold it across filesystem I/O.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::errors::FinalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveStatus {
    #[default]
    None,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupStatus {
    #[default]
    None,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// One download's post-processing unit of work.
#[derive(Debug, Clone, Default)]
pub struct Job {
    pub name: String,
    /// Current destination directory. Holds the intermediate directory until a move succeeds.
    pub dest_dir: PathBuf,
    /// Final directory; `None` means "derive on demand".
    pub final_dir: Option<PathBuf>,
    pub move_status: MoveStatus,
    pub cleanup_status: CleanupStatus,
    pub working: bool,
    pub messages: Vec<JobMessage>,
}

impl Job {
    pub fn new(name: impl Into<String>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dest_dir: dest_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_final_dir(mut self, final_dir: impl Into<PathBuf>) -> Self {
        self.final_dir = Some(final_dir.into());
        self
    }
}

/// Path fields copied out of the registry at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPaths {
    pub name: String,
    pub dest_dir: PathBuf,
    pub final_dir: Option<PathBuf>,
}

/// Terminal result written back at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Files now live in `dest_dir`; the final directory field is cleared.
    Moved { dest_dir: PathBuf },
    MoveFailed,
    Cleanup(CleanupStatus),
}

/// Narrow guarded accessor over the shared job queue.
pub trait JobRegistry: Send + Sync {
    fn read_job_paths(&self, id: JobId) -> Result<JobPaths, FinalizeError>;
    fn write_status(&self, id: JobId, update: StatusUpdate) -> Result<(), FinalizeError>;
    fn add_message(&self, id: JobId, kind: MessageKind, text: &str);
    /// Signal that post-processing for `id` is no longer running.
    fn finish(&self, id: JobId);
}

/// In-memory job queue guarded by a single mutex.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: Mutex<HashMap<JobId, Job>>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<JobId, Job>>, FinalizeError> {
        self.jobs.lock().map_err(|_| FinalizeError::RegistryPoisoned)
    }

    pub fn insert(&self, id: JobId, job: Job) -> Result<(), FinalizeError> {
        self.guard()?.insert(id, job);
        Ok(())
    }

    /// Mark a job as being worked on; runners clear this via `finish`.
    pub fn mark_working(&self, id: JobId) -> Result<(), FinalizeError> {
        let mut jobs = self.guard()?;
        let job = jobs.get_mut(&id).ok_or(FinalizeError::UnknownJob(id))?;
        job.working = true;
        Ok(())
    }

    /// Clone of the current job state.
    pub fn snapshot(&self, id: JobId) -> Option<Job> {
        self.guard().ok()?.get(&id).cloned()
    }
}

impl JobRegistry for JobQueue {
    fn read_job_paths(&self, id: JobId) -> Result<JobPaths, FinalizeError> {
        let jobs = self.guard()?;
        let job = jobs.get(&id).ok_or(FinalizeError::UnknownJob(id))?;
        Ok(JobPaths {
            name: job.name.clone(),
            dest_dir: job.dest_dir.clone(),
            final_dir: job.final_dir.clone(),
        })
    }

    fn write_status(&self, id: JobId, update: StatusUpdate) -> Result<(), FinalizeError> {
        let mut jobs = self.guard()?;
        let job = jobs.get_mut(&id).ok_or(FinalizeError::UnknownJob(id))?;
        match update {
            StatusUpdate::Moved { dest_dir } => {
                job.dest_dir = dest_dir;
                job.final_dir = None;
                job.move_status = MoveStatus::Success;
            }
            StatusUpdate::MoveFailed => job.move_status = MoveStatus::Failure,
            StatusUpdate::Cleanup(status) => job.cleanup_status = status,
        }
        Ok(())
    }

    fn add_message(&self, id: JobId, kind: MessageKind, text: &str) {
        if let Ok(mut jobs) = self.guard()
            && let Some(job) = jobs.get_mut(&id)
        {
            job.messages.push(JobMessage {
                kind,
                text: text.to_string(),
            });
        }
    }

    fn finish(&self, id: JobId) {
        if let Ok(mut jobs) = self.guard()
            && let Some(job) = jobs.get_mut(&id)
        {
            job.working = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_paths_copies_fields() {
        let q = JobQueue::new();
        q.insert(JobId(1), Job::new("Show", "/inter").with_final_dir("/final"))
            .unwrap();
        let p = q.read_job_paths(JobId(1)).unwrap();
        assert_eq!(p.name, "Show");
        assert_eq!(p.dest_dir, PathBuf::from("/inter"));
        assert_eq!(p.final_dir, Some(PathBuf::from("/final")));
    }

    #[test]
    fn unknown_job_is_an_error() {
        let q = JobQueue::new();
        let err = q.read_job_paths(JobId(9)).unwrap_err();
        assert!(matches!(err, FinalizeError::UnknownJob(JobId(9))));
        assert!(q.write_status(JobId(9), StatusUpdate::MoveFailed).is_err());
    }

    #[test]
    fn moved_update_swaps_dest_and_clears_final() {
        let q = JobQueue::new();
        q.insert(JobId(2), Job::new("x", "/inter").with_final_dir("/final"))
            .unwrap();
        q.write_status(
            JobId(2),
            StatusUpdate::Moved {
                dest_dir: PathBuf::from("/final"),
            },
        )
        .unwrap();
        let job = q.snapshot(JobId(2)).unwrap();
        assert_eq!(job.dest_dir, PathBuf::from("/final"));
        assert!(job.final_dir.is_none());
        assert_eq!(job.move_status, MoveStatus::Success);
        assert_eq!(job.cleanup_status, CleanupStatus::None);
    }

    #[test]
    fn finish_clears_working_and_messages_accumulate() {
        let q = JobQueue::new();
        q.insert(JobId(3), Job::new("x", "/inter")).unwrap();
        q.mark_working(JobId(3)).unwrap();
        q.add_message(JobId(3), MessageKind::Info, "hello");
        q.add_message(JobId(3), MessageKind::Error, "boom");
        q.finish(JobId(3));
        let job = q.snapshot(JobId(3)).unwrap();
        assert!(!job.working);
        assert_eq!(job.messages.len(), 2);
        assert_eq!(job.messages[1].kind, MessageKind::Error);
    }
}
