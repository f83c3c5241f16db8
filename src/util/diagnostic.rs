//! User-friendly diagnostic messages.
//!
//! Every error shown to the user should say what went wrong, where, and what
//! to try next.

use std::fmt;
use std::path::PathBuf;

use crate::core::{FormatError, ManifestError};

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when a package directory has no DESCRIPTION file.
    pub const NO_MANIFEST: &str = "help: R packages must have a DESCRIPTION file at their root";

    /// Suggestion when the package name field is missing.
    pub const MISSING_PACKAGE_FIELD: &str = "help: Add a `Package:` field to the DESCRIPTION file";
}

/// An error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
    /// Line within `location`
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
            line: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Add a line number within the location.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            match self.line {
                Some(line) => output.push_str(&format!("  --> {}:{}\n", path.display(), line)),
                None => output.push_str(&format!("  --> {}\n", path.display())),
            }
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

impl From<&ManifestError> for Diagnostic {
    fn from(err: &ManifestError) -> Self {
        let mut location = None;
        let mut inner = err;
        while let ManifestError::InFile { path, source } = inner {
            location = Some(path.clone());
            inner = source.as_ref();
        }

        let mut diag = Diagnostic::error(inner.to_string());
        if let Some(path) = location {
            diag = diag.with_location(path);
        }
        if let Some(line) = err.format_error().and_then(FormatError::line) {
            diag = diag.with_line(line);
        }

        let partial = err.partial();
        if !partial.is_empty() {
            diag = diag.with_context(format!(
                "{} field(s) parsed before the error",
                partial.len()
            ));
        }

        if err.format_error().is_some() {
            diag = diag.with_suggestion(
                "Write the line as `Key: value`, or indent it to continue the previous field",
            );
        }
        diag
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
