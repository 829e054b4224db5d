//! Jar codec
//!
//! Pack a directory tree into a jar and unpack a jar into a directory. A jar
//! is a plain zip as far as this tool is concerned; entry order is never
//! significant and the round-trip is lossless over the entry set.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::PatchResult;

/// Pack the contents of `dir` into a jar at `archive_path`.
///
/// Entry names are relative to `dir` with forward slashes. An empty `dir`
/// produces a valid empty archive.
pub fn pack(dir: &Path, archive_path: &Path) -> PatchResult<()> {
    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options =
        FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);

    pack_dir_recursive(&mut zip, dir, dir, &options)?;

    zip.finish()?;
    Ok(())
}

fn pack_dir_recursive(
    zip: &mut ZipWriter<File>,
    root: &Path,
    dir: &Path,
    options: &FileOptions<()>,
) -> PatchResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let ty = entry.file_type()?;
        if ty.is_dir() {
            pack_dir_recursive(zip, root, &path, options)?;
            continue;
        }
        if !ty.is_file() {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path.as_path());
        let name = rel.to_string_lossy().replace('\\', "/");

        zip.start_file(name, *options)?;
        let mut file = File::open(&path)?;
        io::copy(&mut file, zip)?;
    }
    Ok(())
}

/// Unpack the jar at `archive_path` into `dir`, creating parent directories
/// as needed. Entries with unsafe names (absolute or `..`-escaping) are
/// skipped.
pub fn unpack(archive_path: &Path, dir: &Path) -> PatchResult<()> {
    let file = File::open(archive_path)?;
    let mut zip = ZipArchive::new(file)?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(rel) = entry.enclosed_name() else {
            continue;
        };
        let target = dir.join(rel);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
    }
    Ok(())
}
