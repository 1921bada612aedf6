//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::EXT_CLEANUP_DEFAULT;
use crate::fs_ops::sanitize_name;
use crate::matcher::ExtensionList;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the post-processing runners.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base under which a job's final directory is derived when the job has none
    pub dest_base: Option<PathBuf>,
    /// Extension cleanup list, `,`/`;` separated
    pub ext_cleanup: String,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dest_base: None,
            ext_cleanup: EXT_CLEANUP_DEFAULT.to_string(),
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config with an explicit destination base; other fields use defaults.
    pub fn new(dest_base: impl Into<PathBuf>) -> Self {
        Self {
            dest_base: Some(dest_base.into()),
            ..Default::default()
        }
    }

    /// `<dest_base>/<sanitized job name>`, or None without a dest_base.
    pub fn build_final_dir(&self, job_name: &str) -> Option<PathBuf> {
        self.dest_base
            .as_ref()
            .map(|base| base.join(sanitize_name(job_name)))
    }

    pub fn cleanup_list(&self) -> ExtensionList {
        ExtensionList::parse(&self.ext_cleanup)
    }
}
