//! Artifact mapper
//!
//! Maps changed source files to the compiled artifacts they produce. Input
//! is a lazy stream of source paths relative to the package root, one per
//! line; output is the set of `.class` paths to overlay, including the
//! `Base$Inner.class` companions that a single source file compiles to.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{PatchError, PatchResult};

/// Recognized source file extension
pub const SOURCE_EXT: &str = ".java";

/// Compiled artifact extension
pub const CLASS_EXT: &str = ".class";

/// Map newline-separated source identifiers to compiled artifact paths.
///
/// `classes_root` is the root of the unpacked source jar. Identifiers not
/// ending in `.java` are skipped without error; each accepted identifier is
/// echoed for operator visibility. An accepted identifier whose compiled
/// form is missing aborts the run with `NoMatchingArtifact`.
pub fn map_sources<R: BufRead>(reader: R, classes_root: &Path) -> PatchResult<Vec<PathBuf>> {
    let mut artifacts = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let source = line.trim();
        if source.is_empty() {
            continue;
        }
        let Some(stem) = source.strip_suffix(SOURCE_EXT) else {
            continue;
        };

        println!("swap {source}");

        let matched = artifacts_for(classes_root, Path::new(stem))?;
        if matched.is_empty() {
            return Err(PatchError::NoMatchingArtifact {
                source: source.to_string(),
            });
        }
        artifacts.extend(matched);
    }

    Ok(artifacts)
}

/// Compiled artifacts for one source stem (`pkg/Foo` for `pkg/Foo.java`):
/// `pkg/Foo.class` plus every `pkg/Foo$*.class`.
fn artifacts_for(classes_root: &Path, stem: &Path) -> PatchResult<Vec<PathBuf>> {
    let base = stem
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if base.is_empty() {
        return Ok(Vec::new());
    }
    let rel_dir = stem.parent().unwrap_or_else(|| Path::new(""));
    let dir = classes_root.join(rel_dir);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let primary = format!("{base}{CLASS_EXT}");
    let companion_prefix = format!("{base}$");

    let mut matched = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name == primary || (name.starts_with(&companion_prefix) && name.ends_with(CLASS_EXT)) {
            matched.push(rel_dir.join(name));
        }
    }
    matched.sort();
    Ok(matched)
}
