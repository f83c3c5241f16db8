//! Format errors shared by the manifest and dependency parsers.

use thiserror::Error;

/// A malformed line or token in package metadata.
///
/// Line numbers are 1-based and count blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("line {line}: continuation before key")]
    ContinuationBeforeKey { line: usize },

    #[error("line {line}: line has no separator: {text:?}")]
    MissingSeparator { line: usize, text: String },

    #[error("line {line}: empty key: {text:?}")]
    EmptyKey { line: usize, text: String },

    #[error("unable to parse R package dependency {segment:?}")]
    InvalidDependency { segment: String },
}

impl FormatError {
    /// The manifest line this error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::ContinuationBeforeKey { line }
            | FormatError::MissingSeparator { line, .. }
            | FormatError::EmptyKey { line, .. } => Some(*line),
            FormatError::InvalidDependency { .. } => None,
        }
    }
}
