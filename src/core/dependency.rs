//! Dependency declarations from manifest fields.
//!
//! Fields such as `Depends` and `Imports` hold comma-separated package names,
//! each optionally followed by a parenthesized version constraint. Only the
//! names matter for the build graph; constraints are discarded.

use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::error::FormatError;

static DEPENDENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\S+)(\s+\(.*\))?\s*$").expect("dependency pattern is a valid regex")
});

/// A bare package name taken from a dependency field.
///
/// Never empty and never contains commas or whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DependencyName(String);

impl DependencyName {
    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned name.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for DependencyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DependencyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DependencyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for DependencyName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DependencyName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Parse a dependency field value into package names, in declaration order.
///
/// Segments that are empty after trimming are skipped. Any other segment
/// that is not `name` or `name (constraint)` fails the whole field.
pub fn parse_deps(field: &str) -> Result<Vec<DependencyName>, FormatError> {
    let mut deps = Vec::new();

    for segment in field.split(',') {
        if segment.trim().is_empty() {
            continue;
        }

        let name = DEPENDENCY_RE
            .captures(segment)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| FormatError::InvalidDependency {
                segment: segment.to_string(),
            })?;

        deps.push(DependencyName(name.as_str().to_string()));
    }

    Ok(deps)
}
