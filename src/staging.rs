//! Destination-side staging namespace
//!
//! All state classpatch keeps next to a destination jar lives under a single
//! directory keyed by the jar's file name:
//!
//! ```text
//! <jar dir>/.classpatch/<jar name>/
//!   pristine.jar   backup of the jar before the first patch (create-once)
//!   overlay.jar    delivered overlay archive
//!   overlay/       unpacked overlay, cleared each merge
//!   merged/        unpacked backup plus overlay, cleared each merge
//!   lock           advisory lock serializing merge/restore runs
//! ```
//!
//! This module is the only owner of that path layout; merge and restore go
//! through it rather than composing paths themselves.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::PatchResult;

/// Directory name of the staging namespace next to the destination jar
pub const STAGING_DIR_NAME: &str = ".classpatch";

/// Staging namespace for one destination jar
#[derive(Debug, Clone)]
pub struct StagingArea {
    root: PathBuf,
    jar_path: PathBuf,
}

impl StagingArea {
    /// Staging area for the jar at `jar_path`. Does not touch the filesystem.
    pub fn for_archive(jar_path: &Path) -> Self {
        let dir = jar_path.parent().unwrap_or_else(|| Path::new("."));
        let name = jar_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archive".to_string());
        Self {
            root: dir.join(STAGING_DIR_NAME).join(name),
            jar_path: jar_path.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The destination jar this area belongs to
    pub fn jar_path(&self) -> &Path {
        &self.jar_path
    }

    pub fn backup_path(&self) -> PathBuf {
        self.root.join("pristine.jar")
    }

    pub fn overlay_archive_path(&self) -> PathBuf {
        self.root.join("overlay.jar")
    }

    pub fn overlay_dir(&self) -> PathBuf {
        self.root.join("overlay")
    }

    pub fn merged_dir(&self) -> PathBuf {
        self.root.join("merged")
    }

    pub fn backup_exists(&self) -> bool {
        self.backup_path().exists()
    }

    /// Create the staging root if it does not exist yet
    pub fn ensure_root(&self) -> PatchResult<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Clear and recreate a staging subdirectory
    pub fn recreate_dir(&self, dir: &Path) -> PatchResult<()> {
        if dir.exists() {
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir)?;
        Ok(())
    }

    /// Delete the whole namespace for this jar, lock file included.
    /// Missing directory is not an error.
    pub fn remove_all(&self) -> PatchResult<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Take the exclusive destination lock, blocking until available.
    ///
    /// The lock serializes merge and restore runs against the same jar; it
    /// releases when the returned guard drops.
    pub fn lock(&self) -> PatchResult<StagingLock> {
        self.ensure_root()?;
        let file = File::create(self.root.join("lock"))?;
        file.lock_exclusive()?;
        Ok(StagingLock { file })
    }
}

/// Guard holding the exclusive staging lock
pub struct StagingLock {
    file: File,
}

impl Drop for StagingLock {
    fn drop(&mut self) {
        // Unlock errors on drop have no recovery path
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
