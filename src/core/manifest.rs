//! DESCRIPTION manifest parsing.
//!
//! R packages describe themselves in a `DESCRIPTION` file formatted as a
//! Debian Control File: `Key: value` lines, where lines starting with a space
//! or tab continue the previous value. R only allows a single paragraph, so
//! empty lines carry no meaning and are skipped wherever they appear. A line
//! holding only whitespace is still a continuation line.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::core::error::FormatError;

/// Conventional file name of an R package manifest.
pub const MANIFEST_NAME: &str = "DESCRIPTION";

/// Field names and their values from a single manifest paragraph.
///
/// Keys are case-sensitive and never empty. Continuation lines are joined
/// onto their value with a single space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ManifestFields(BTreeMap<String, String>);

impl ManifestFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no fields were parsed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the fields back into manifest syntax, one `Key: value` per line.
    pub fn to_dcf(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            if value.is_empty() {
                out.push_str(&format!("{}:\n", key));
            } else {
                out.push_str(&format!("{}: {}\n", key, value));
            }
        }
        out
    }

    fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ManifestFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ManifestFields(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for ManifestFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dcf())
    }
}

/// Error from parsing a manifest.
///
/// Every variant keeps the fields committed before the failure so callers
/// can still report on what was readable.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{error}")]
    Format {
        error: FormatError,
        partial: ManifestFields,
    },

    #[error("failed to read manifest: {source}")]
    Io {
        #[source]
        source: io::Error,
        partial: ManifestFields,
    },

    #[error("parsing {}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ManifestError>,
    },
}

impl ManifestError {
    /// Fields parsed before the error occurred.
    pub fn partial(&self) -> &ManifestFields {
        match self {
            ManifestError::Format { partial, .. } | ManifestError::Io { partial, .. } => partial,
            ManifestError::InFile { source, .. } => source.partial(),
        }
    }

    /// Take ownership of the fields parsed before the error occurred.
    pub fn into_partial(self) -> ManifestFields {
        match self {
            ManifestError::Format { partial, .. } | ManifestError::Io { partial, .. } => partial,
            ManifestError::InFile { source, .. } => source.into_partial(),
        }
    }

    /// The underlying format error, if the manifest was malformed.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            ManifestError::Format { error, .. } => Some(error),
            ManifestError::Io { .. } => None,
            ManifestError::InFile { source, .. } => source.format_error(),
        }
    }
}

/// Parse a manifest from a string.
pub fn parse_dcf_str(input: &str) -> Result<ManifestFields, ManifestError> {
    parse_dcf(input.as_bytes())
}

/// Parse a manifest file, attaching the path to any error.
pub fn parse_dcf_file(path: &Path) -> Result<ManifestFields, ManifestError> {
    let in_file = |source: ManifestError| ManifestError::InFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    };

    let file = File::open(path).map_err(|source| {
        in_file(ManifestError::Io {
            source,
            partial: ManifestFields::new(),
        })
    })?;

    parse_dcf(BufReader::new(file)).map_err(in_file)
}

/// Parse a single-paragraph manifest from a line reader.
pub fn parse_dcf<R: BufRead>(reader: R) -> Result<ManifestFields, ManifestError> {
    let mut fields = ManifestFields::new();
    let mut pending: Option<(String, String)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = match line {
            Ok(line) => line,
            Err(source) => {
                return Err(ManifestError::Io {
                    source,
                    partial: fields,
                })
            }
        };

        if line.is_empty() {
            continue;
        }

        if line.starts_with([' ', '\t']) {
            let Some((_, value)) = pending.as_mut() else {
                return Err(ManifestError::Format {
                    error: FormatError::ContinuationBeforeKey { line: line_no },
                    partial: fields,
                });
            };
            let rest = line.trim();
            if rest.is_empty() {
                continue;
            }
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(rest);
            continue;
        }

        if let Some((key, value)) = pending.take() {
            fields.insert(key, value);
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(ManifestError::Format {
                error: FormatError::MissingSeparator {
                    line: line_no,
                    text: line.clone(),
                },
                partial: fields,
            });
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(ManifestError::Format {
                error: FormatError::EmptyKey {
                    line: line_no,
                    text: line.clone(),
                },
                partial: fields,
            });
        }

        pending = Some((key.to_string(), value.trim().to_string()));
    }

    if let Some((key, value)) = pending {
        fields.insert(key, value);
    }

    Ok(fields)
}
