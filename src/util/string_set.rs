//! Immutable sets of names used in configuration.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A sorted set of strings, written as a comma-separated list.
///
/// Values are built once and never mutated through shared references; a
/// nested configuration scope replaces its copy wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringSet(BTreeSet<String>);

impl StringSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list. Entries are trimmed and empty ones dropped.
    pub fn parse(s: &str) -> Self {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Check if the set contains `item`.
    pub fn contains(&self, item: &str) -> bool {
        self.0.contains(item)
    }

    /// Iterate entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        StringSet(iter.into_iter().map(Into::into).collect())
    }
}

impl FromStr for StringSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StringSet::parse(s))
    }
}

impl fmt::Display for StringSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<&str> = self.iter().collect();
        f.write_str(&items.join(","))
    }
}
