//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::Label;
use crate::util::diagnostic::Diagnostic;

/// Error during label resolution.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    /// A package's own name did not resolve to exactly one rule.
    ///
    /// Every other label generated for the package depends on this mapping,
    /// so it is never degraded to a warning.
    #[error("package `{package}` must have exactly 1 label, but got {}", candidates.len())]
    #[diagnostic(
        code(razel::resolve::own_identity),
        help("check that exactly one r_pkg rule is indexed for `{package}`")
    )]
    OwnIdentity {
        package: String,
        candidates: Vec<Label>,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::OwnIdentity {
                package,
                candidates,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "package `{}` does not resolve to a single rule",
                    package
                ));

                if candidates.is_empty() {
                    diag = diag.with_context("no rule in the index provides this package");
                } else {
                    for label in candidates {
                        diag = diag.with_context(format!("provided by {}", label));
                    }
                }

                diag.with_suggestion(format!(
                    "Make sure exactly one DESCRIPTION declares `Package: {}`",
                    package
                ))
            }
        }
    }
}
