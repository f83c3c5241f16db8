//! Test utilities for razel unit tests.

pub mod fixtures;

use std::path::{Path, PathBuf};

pub use fixtures::*;

use crate::core::MANIFEST_NAME;

/// Write a DESCRIPTION file into `root/dir`, returning its path.
pub fn write_package(root: &Path, dir: &str, description: &str) -> PathBuf {
    let pkg_dir = root.join(dir);
    std::fs::create_dir_all(&pkg_dir).unwrap();
    let path = pkg_dir.join(MANIFEST_NAME);
    std::fs::write(&path, description).unwrap();
    path
}
