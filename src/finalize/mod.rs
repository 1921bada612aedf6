//! Post-download finalization units: relocation and extension cleanup.

mod cleanup;
mod relocate;
mod report;

pub use cleanup::{CleanupOutcome, TreeCleaner};
pub use relocate::{EXCLUDED_RENAME_EXTENSIONS, Relocator};
pub use report::JobLog;
