//! Test fixtures for R package trees.

use std::path::{Path, PathBuf};

/// Fixture for an R package directory.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    /// Package name.
    pub name: String,
    /// Directory relative to the tree root.
    pub dir: String,
    /// `Depends` field value, if any.
    pub depends: Option<String>,
    /// `Imports` field value, if any.
    pub imports: Option<String>,
    /// `Suggests` field value, if any.
    pub suggests: Option<String>,
}

impl PackageFixture {
    /// A package living at `dir` with no dependencies.
    pub fn new(name: impl Into<String>, dir: impl Into<String>) -> Self {
        PackageFixture {
            name: name.into(),
            dir: dir.into(),
            depends: None,
            imports: None,
            suggests: None,
        }
    }

    pub fn depends(mut self, value: impl Into<String>) -> Self {
        self.depends = Some(value.into());
        self
    }

    pub fn imports(mut self, value: impl Into<String>) -> Self {
        self.imports = Some(value.into());
        self
    }

    pub fn suggests(mut self, value: impl Into<String>) -> Self {
        self.suggests = Some(value.into());
        self
    }

    /// Render the DESCRIPTION file.
    pub fn description(&self) -> String {
        let mut out = format!("Package: {}\nVersion: 0.1.0\n", self.name);
        for (key, value) in [
            ("Depends", &self.depends),
            ("Imports", &self.imports),
            ("Suggests", &self.suggests),
        ] {
            if let Some(value) = value {
                out.push_str(&format!("{}: {}\n", key, value));
            }
        }
        out
    }

    /// Write the package under `root`, returning the DESCRIPTION path.
    pub fn write(&self, root: &Path) -> PathBuf {
        super::write_package(root, &self.dir, &self.description())
    }
}
