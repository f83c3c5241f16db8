//! Core data structures for razel.
//!
//! This module contains the foundational types used throughout razel:
//! - DESCRIPTION manifests and their fields
//! - Dependency names parsed from manifest fields
//! - Build labels
//! - Exclude pattern files

pub mod dependency;
pub mod error;
pub mod exclude;
pub mod label;
pub mod manifest;

pub use dependency::{parse_deps, DependencyName};
pub use error::FormatError;
pub use exclude::{load_exclude_patterns, ExcludeError};
pub use label::Label;
pub use manifest::{
    parse_dcf, parse_dcf_file, parse_dcf_str, ManifestError, ManifestFields, MANIFEST_NAME,
};
