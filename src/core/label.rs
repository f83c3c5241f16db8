//! Build labels - WHERE a package is built.
//!
//! A label names a rule in the build graph as `@repo//pkg:name`. The repo is
//! empty for the main repository, and a relative label (`:name`) refers to a
//! rule in the same package as the label's user.

use std::fmt;

use serde::{Serialize, Serializer};

/// A reference to a rule in the build graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    /// Repository name without the leading `@`; empty for the main repository
    pub repo: String,
    /// Package path within the repository
    pub pkg: String,
    /// Rule name; may be empty when the indexer could not read it
    pub name: String,
    /// Whether this is a package-relative `:name` label
    pub relative: bool,
}

impl Label {
    /// Create an absolute label.
    pub fn new(repo: impl Into<String>, pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Label {
            repo: repo.into(),
            pkg: pkg.into(),
            name: name.into(),
            relative: false,
        }
    }

    /// Create a label in the main repository.
    pub fn local(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Label::new("", pkg, name)
    }

    /// Last segment of the package path.
    pub fn pkg_basename(&self) -> &str {
        self.pkg.rsplit('/').next().unwrap_or_default()
    }

    /// Make this label relative to a rule in `repo`/`pkg`.
    ///
    /// Labels in another repository are returned unchanged. Labels in the
    /// same package collapse to `:name`, and labels in the same repository
    /// drop the repository.
    pub fn rel(&self, repo: &str, pkg: &str) -> Label {
        if self.relative || self.repo != repo {
            return self.clone();
        }
        if self.pkg == pkg {
            return Label {
                name: self.name.clone(),
                relative: true,
                ..Label::default()
            };
        }
        Label::local(self.pkg.clone(), self.name.clone())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative {
            return write!(f, ":{}", self.name);
        }
        if !self.repo.is_empty() {
            write!(f, "@{}", self.repo)?;
        }
        if !self.pkg.is_empty() && self.pkg_basename() == self.name {
            write!(f, "//{}", self.pkg)
        } else {
            write!(f, "//{}:{}", self.pkg, self.name)
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
