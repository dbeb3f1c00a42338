// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::sanitize::region_file_stem;
use crate::error::{Error, Result};

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Ensure the parent of `path` exists (no-op for bare file names).
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// `<dir>/<Region_Name>.json`
pub fn region_archive_path(dir: &Path, region: &str) -> PathBuf {
    dir.join(format!("{}.json", region_file_stem(region)))
}

/// Staged archives in `dir`: every `*.json` file whose name does not contain
/// `exclude_marker`, sorted by file name.
pub fn discover_staged(dir: &Path, exclude_marker: &str) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    if !dir.exists() { return Ok(out); }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() { continue; }
        if path.extension().and_then(|s| s.to_str()) != Some("json") { continue; }

        let name = path.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
        if !exclude_marker.is_empty() && name.contains(exclude_marker) { continue; }
        out.push(path);
    }
    out.sort();
    Ok(out)
}
