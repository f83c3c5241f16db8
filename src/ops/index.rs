//! Indexing the R packages in a source tree.
//!
//! Every directory holding a DESCRIPTION file is treated as an R package
//! built by a rule named after the directory. Manifests are parsed in
//! parallel, but the index is filled in path order so lookups stay stable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::core::{parse_dcf_file, Label, MANIFEST_NAME};
use crate::ops::imports::PACKAGE_FIELD;
use crate::resolver::{RuleIndex, R_LANG};
use crate::util::fs::{relative_path, to_slash};

/// An R package found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPackage {
    /// Package name from the DESCRIPTION file
    pub name: String,
    /// Label of the rule building the package
    pub label: Label,
    /// Path to the DESCRIPTION file
    pub manifest_path: PathBuf,
}

/// Find every DESCRIPTION file under `root`, sorted by path.
///
/// Hidden directories are skipped.
pub fn discover_manifests(root: &Path) -> Result<Vec<PathBuf>> {
    let mut manifests = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_file() && entry.file_name() == MANIFEST_NAME {
            manifests.push(entry.into_path());
        }
    }

    Ok(manifests)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Label of the package rule for a package directory under `root`.
///
/// The rule is named after the directory; a package at the root is named
/// after the package itself.
pub fn package_label(root: &Path, pkg_dir: &Path, pkg_name: &str) -> Label {
    let pkg = to_slash(&relative_path(root, pkg_dir));
    let name = match pkg.rsplit('/').next() {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => pkg_name.to_string(),
    };
    Label::local(pkg, name)
}

/// Scan `root` for R packages.
///
/// Manifests that fail to parse or lack a package name are skipped with a
/// warning so one broken package does not hide the rest.
pub fn scan_packages(root: &Path) -> Result<Vec<IndexedPackage>> {
    let manifests = discover_manifests(root)?;
    tracing::debug!("found {} DESCRIPTION files under {}", manifests.len(), root.display());

    let parsed: Vec<_> = manifests
        .par_iter()
        .map(|path| (path, parse_dcf_file(path)))
        .collect();

    let mut packages = Vec::new();
    for (path, result) in parsed {
        let fields = match result {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!("skipping package: {:#}", anyhow::Error::from(e));
                continue;
            }
        };

        let Some(name) = fields.get(PACKAGE_FIELD).filter(|n| !n.is_empty()) else {
            tracing::warn!("skipping {}: no `Package` field", path.display());
            continue;
        };

        let pkg_dir = path.parent().unwrap_or(root);
        packages.push(IndexedPackage {
            name: name.to_string(),
            label: package_label(root, pkg_dir, name),
            manifest_path: path.clone(),
        });
    }

    Ok(packages)
}

/// Build a rule index of the R packages under `root`.
pub fn index_packages(root: &Path) -> Result<RuleIndex> {
    let mut index = RuleIndex::new();
    for pkg in scan_packages(root)? {
        tracing::debug!("indexed {} as {}", pkg.name, pkg.label);
        index.insert(R_LANG, pkg.name, pkg.label);
    }
    Ok(index)
}
