//! Exclude pattern files.
//!
//! Each file lists one regular expression per line. Blank lines are skipped
//! and there is no comment syntax. Patterns match case-insensitively.

use std::io;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Error loading exclude patterns.
#[derive(Debug, Error)]
pub enum ExcludeError {
    #[error("failed to read exclude file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("in {}, can not compile regular expression {pattern:?}", path.display())]
    InvalidPattern {
        path: PathBuf,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Load and compile the patterns from every file, in file then line order.
///
/// The first unreadable file or invalid pattern fails the whole load.
pub fn load_exclude_patterns<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Regex>, ExcludeError> {
    let mut patterns = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ExcludeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        for line in contents.lines() {
            let pattern = line.trim();
            if pattern.is_empty() {
                continue;
            }

            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ExcludeError::InvalidPattern {
                    path: path.to_path_buf(),
                    pattern: pattern.to_string(),
                    source,
                })?;
            patterns.push(regex);
        }
    }

    tracing::debug!("loaded {} exclude patterns", patterns.len());
    Ok(patterns)
}
