//! Local stager
//!
//! Builds the overlay jar entirely on the local side: unpack the source jar
//! into a fresh working directory, copy the mapped artifacts into an overlay
//! tree mirroring their relative paths, pack that tree into `overlay.jar`.
//! Nothing here ever touches the destination.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::archive;
use crate::error::PatchResult;

/// Staged overlay build for one patch run
///
/// The working directory is a per-run tempdir; it is removed when the
/// builder drops, so the overlay jar must be delivered before then.
pub struct OverlayBuilder {
    work: TempDir,
}

impl OverlayBuilder {
    /// Create a fresh working directory for this run
    pub fn new() -> PatchResult<Self> {
        Ok(Self {
            work: tempfile::tempdir()?,
        })
    }

    /// Root of the unpacked source jar
    pub fn classes_root(&self) -> PathBuf {
        self.work.path().join("pristine")
    }

    fn overlay_dir(&self) -> PathBuf {
        self.work.path().join("overlay")
    }

    /// Unpack the source jar so artifacts can be mapped and copied from it
    pub fn unpack_source(&self, source_jar: &Path) -> PatchResult<()> {
        let root = self.classes_root();
        fs::create_dir_all(&root)?;
        archive::unpack(source_jar, &root)
    }

    /// Copy the mapped artifacts into the overlay tree, then pack it.
    ///
    /// An empty artifact list still yields a valid (empty) overlay jar so
    /// the rest of the pipeline behaves uniformly.
    pub fn build(&self, artifacts: &[PathBuf]) -> PatchResult<PathBuf> {
        let classes = self.classes_root();
        let overlay = self.overlay_dir();
        fs::create_dir_all(&overlay)?;

        for rel in artifacts {
            let target = overlay.join(rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(classes.join(rel), target)?;
        }

        if artifacts.is_empty() {
            println!("nothing to swap");
        }

        let overlay_jar = self.work.path().join("overlay.jar");
        archive::pack(&overlay, &overlay_jar)?;
        Ok(overlay_jar)
    }
}
