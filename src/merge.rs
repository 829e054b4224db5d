//! Destination-side merge
//!
//! Runs next to the destination jar (in-process for local destinations, as
//! `classpatch merge <jar>` over ssh for remote ones). Sequential chain:
//! ensure the pristine backup exists, unpack backup and overlay, copy the
//! overlay entries over the backup tree, repack and atomically replace the
//! destination jar. The first failing step aborts the chain; there is no
//! rollback, and the next run's unconditional directory clears are the
//! recovery path.

use std::fs;
use std::path::Path;

use crate::archive;
use crate::error::{PatchError, PatchResult};
use crate::staging::StagingArea;

/// Merge the delivered overlay jar onto the destination jar.
///
/// Expects `overlay.jar` to already sit in the jar's staging area. Holds the
/// destination lock for the whole chain.
pub fn run_merge(jar_path: &Path, verbose: u8) -> PatchResult<()> {
    let area = StagingArea::for_archive(jar_path);
    let _lock = area.lock()?;

    ensure_backup(&area)?;
    unpack_both(&area, verbose)?;
    overlay_merge(&area)?;
    repack(&area)?;
    Ok(())
}

fn step_err(step: &'static str, err: PatchError) -> PatchError {
    match err {
        // Already annotated by a nested step
        PatchError::MergeFailed { .. } => err,
        other => PatchError::MergeFailed {
            step,
            detail: other.to_string(),
        },
    }
}

/// Copy the current jar to `pristine.jar` unless a backup already exists.
///
/// The backup is created at most once so repeated patch runs replace rather
/// than stack: every merge starts from the same baseline.
fn ensure_backup(area: &StagingArea) -> PatchResult<()> {
    if area.backup_exists() {
        return Ok(());
    }
    fs::copy(area.jar_path(), area.backup_path())
        .map_err(|e| step_err("ensure_backup", e.into()))?;
    Ok(())
}

fn unpack_both(area: &StagingArea, verbose: u8) -> PatchResult<()> {
    let overlay = area.overlay_dir();
    let merged = area.merged_dir();
    area.recreate_dir(&overlay)
        .map_err(|e| step_err("unpack_both", e))?;
    area.recreate_dir(&merged)
        .map_err(|e| step_err("unpack_both", e))?;

    if verbose > 0 {
        println!("unpacking overlay into {}", overlay.display());
        println!("unpacking backup into {}", merged.display());
    }

    archive::unpack(&area.overlay_archive_path(), &overlay)
        .map_err(|e| step_err("unpack_both", e))?;
    archive::unpack(&area.backup_path(), &merged)
        .map_err(|e| step_err("unpack_both", e))?;
    Ok(())
}

/// Copy every overlay entry over the merged tree, overwriting on collision.
fn overlay_merge(area: &StagingArea) -> PatchResult<()> {
    copy_tree(&area.overlay_dir(), &area.merged_dir())
        .map_err(|e| step_err("overlay_merge", e.into()))
}

fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            fs::create_dir_all(&to)?;
            copy_tree(&from, &to)?;
            continue;
        }
        // Artifacts unpacked from the original jar may carry a read-only
        // bit; clear it so the overwrite and a later repack can proceed.
        if to.exists() {
            let mut perms = fs::metadata(&to)?.permissions();
            if perms.readonly() {
                perms.set_readonly(false);
                fs::set_permissions(&to, perms)?;
            }
        }
        fs::copy(&from, &to)?;
    }
    Ok(())
}

/// Pack the merged tree and atomically swap it in as the destination jar
fn repack(area: &StagingArea) -> PatchResult<()> {
    let patched = area.root().join("patched.jar");
    archive::pack(&area.merged_dir(), &patched).map_err(|e| step_err("repack", e))?;
    fs::rename(&patched, area.jar_path()).map_err(|e| step_err("repack", e.into()))?;
    Ok(())
}
