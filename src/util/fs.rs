//! Filesystem utilities.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use walkdir::WalkDir;

/// List every file under `dir`, as paths relative to `dir`, sorted.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("failed to walk directory: {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(relative_path(dir, entry.path()));
    }

    Ok(files)
}

/// Drop every path matched by one of `patterns`.
///
/// Paths are matched in their `/`-separated form so patterns behave the same
/// on every platform.
pub fn filter_excluded(files: Vec<PathBuf>, patterns: &[Regex]) -> Vec<PathBuf> {
    if patterns.is_empty() {
        return files;
    }

    files
        .into_iter()
        .filter(|path| {
            let slashed = to_slash(path);
            match patterns.iter().find(|p| p.is_match(&slashed)) {
                Some(p) => {
                    tracing::debug!("excluding {} (matched {:?})", slashed, p.as_str());
                    false
                }
                None => true,
            }
        })
        .collect()
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Render a relative path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
