//! Restore manager
//!
//! Puts the pristine backup back as the destination jar and discards all
//! staging state for it. With no backup present there is nothing to undo;
//! that is reported as a successful no-op, so restore is safe to run any
//! number of times.

use std::fs;
use std::path::Path;

use crate::error::PatchResult;
use crate::staging::StagingArea;

/// Outcome of a restore run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Backup existed; the destination jar is pristine again
    Restored,
    /// No backup existed; nothing was changed
    NothingToRestore,
}

/// Restore the jar at `jar_path` from its pristine backup, if one exists.
pub fn run_restore(jar_path: &Path) -> PatchResult<RestoreOutcome> {
    let area = StagingArea::for_archive(jar_path);
    if !area.backup_exists() {
        println!("nothing to restore");
        return Ok(RestoreOutcome::NothingToRestore);
    }

    let _lock = area.lock()?;
    fs::copy(area.backup_path(), jar_path)?;
    area.remove_all()?;
    Ok(RestoreOutcome::Restored)
}
