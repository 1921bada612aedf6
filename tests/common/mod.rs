//! Shared test helpers: a `Filesystem` that fails on chosen paths.
#![allow(dead_code)]

use std::collections::HashSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use post_finalize::job::{JobMessage, MessageKind};
use post_finalize::{Filesystem, Job, JobId, JobQueue, LocalFs};

/// Delegates to the local disk except for paths registered to fail.
#[derive(Default)]
pub struct FaultyFs {
    fail_moves: HashSet<PathBuf>,
    fail_deletes: HashSet<PathBuf>,
    fail_mkdir: bool,
    fail_delete_tree: bool,
}

impl FaultyFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_move(mut self, src: impl Into<PathBuf>) -> Self {
        self.fail_moves.insert(src.into());
        self
    }

    pub fn fail_delete(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_deletes.insert(path.into());
        self
    }

    pub fn fail_mkdir(mut self) -> Self {
        self.fail_mkdir = true;
        self
    }

    pub fn fail_delete_tree(mut self) -> Self {
        self.fail_delete_tree = true;
        self
    }
}

fn denied() -> io::Error {
    io::Error::from(io::ErrorKind::PermissionDenied)
}

impl Filesystem for FaultyFs {
    fn list_entries<'a>(&'a self, dir: &Path) -> Box<dyn Iterator<Item = OsString> + 'a> {
        LocalFs.list_entries(dir)
    }

    fn move_entry(&self, src: &Path, dst: &Path) -> io::Result<()> {
        if self.fail_moves.contains(src) {
            return Err(denied());
        }
        LocalFs.move_entry(src, dst)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        if self.fail_deletes.contains(path) {
            return Err(denied());
        }
        LocalFs.delete_file(path)
    }

    fn delete_tree(&self, dir: &Path) -> io::Result<()> {
        if self.fail_delete_tree {
            return Err(denied());
        }
        LocalFs.delete_tree(dir)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        LocalFs.directory_exists(path)
    }

    fn entry_exists(&self, path: &Path) -> bool {
        LocalFs.entry_exists(path)
    }

    fn ensure_directory_tree(&self, path: &Path) -> io::Result<()> {
        if self.fail_mkdir {
            return Err(denied());
        }
        LocalFs.ensure_directory_tree(path)
    }

    fn canonical_path(&self, path: &Path) -> io::Result<PathBuf> {
        LocalFs.canonical_path(path)
    }
}

/// Queue holding a single job under `JobId(1)`.
pub fn queue_with(job: Job) -> Arc<JobQueue> {
    let q = Arc::new(JobQueue::new());
    q.insert(JobId(1), job).unwrap();
    q.mark_working(JobId(1)).unwrap();
    q
}

pub fn messages(q: &JobQueue, kind: MessageKind) -> Vec<String> {
    q.snapshot(JobId(1))
        .map(|j| j.messages)
        .unwrap_or_default()
        .into_iter()
        .filter(|m: &JobMessage| m.kind == kind)
        .map(|m| m.text)
        .collect()
}

/// Sorted names directly inside `dir`.
pub fn names(dir: &Path) -> Vec<String> {
    let mut v: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    v.sort();
    v
}
