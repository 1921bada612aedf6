//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - When --name is omitted the job is named after its directory.

use clap::{Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};

/// Finalize one completed download job.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move completed download jobs into place and purge junk files"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Explicit config file (otherwise $POST_FINALIZE_CONFIG or the OS default).
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Base directory for deriving a job's final directory.
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub dest_base: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Move a job's files from its intermediate directory into its final directory.
    Move {
        /// Job display name (defaults to the intermediate directory's name).
        #[arg(long)]
        name: Option<String>,

        /// Intermediate directory holding the finished payload.
        #[arg(long, value_hint = ValueHint::DirPath)]
        inter_dir: PathBuf,

        /// Final directory (defaults to <dest-base>/<name>).
        #[arg(long, value_hint = ValueHint::DirPath)]
        final_dir: Option<PathBuf>,
    },
    /// Delete files matching the extension cleanup list.
    Cleanup {
        /// Job display name (defaults to the directory's name).
        #[arg(long)]
        name: Option<String>,

        /// Job directory to clean.
        #[arg(long, value_hint = ValueHint::DirPath)]
        dir: PathBuf,

        /// Second directory to clean when different from --dir.
        #[arg(long, value_hint = ValueHint::DirPath)]
        final_dir: Option<PathBuf>,

        /// Extension cleanup list, e.g. ".nfo,.sfv;*sample*".
        #[arg(long)]
        ext: Option<String>,
    },
}

impl Command {
    /// The job's display name: --name, else the last component of the job directory.
    pub fn job_name(&self) -> String {
        let (name, dir) = match self {
            Command::Move { name, inter_dir, .. } => (name, inter_dir),
            Command::Cleanup { name, dir, .. } => (name, dir),
        };
        name.clone().unwrap_or_else(|| dir_label(dir))
    }
}

fn dir_label(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(base) = &self.dest_base {
            cfg.dest_base = Some(base.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        if let Command::Cleanup { ext: Some(ext), .. } = &self.command {
            cfg.ext_cleanup = ext.clone();
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
