//! razel - build-graph metadata for R packages
//!
//! This crate reads R package DESCRIPTION files, extracts their dependency
//! declarations, and resolves package names into build labels for a
//! build-file generator.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities for razel unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    dependency::DependencyName, label::Label, manifest::ManifestFields, FormatError,
};

pub use resolver::{Lookup, ResolveError, RuleIndex};
pub use util::config::RConfig;
