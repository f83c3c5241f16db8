//! Dependency name to label resolution.
//!
//! The resolver is pure and deterministic: for a fixed lookup and input it
//! always produces the same sorted output.

use crate::core::Label;
use crate::resolver::errors::ResolveError;
use crate::resolver::index::Lookup;

/// Language tag R packages are indexed under.
pub const R_LANG: &str = "R";

/// Resolves package names into labels relative to a requesting rule.
pub struct DepResolver<'a, L: Lookup + ?Sized> {
    lookup: &'a L,
    from: &'a Label,
    external_prefix: &'a str,
}

impl<'a, L: Lookup + ?Sized> DepResolver<'a, L> {
    /// Create a resolver for rules at `from`.
    pub fn new(lookup: &'a L, from: &'a Label, external_prefix: &'a str) -> Self {
        DepResolver {
            lookup,
            from,
            external_prefix,
        }
    }

    /// Resolve dependency names to sorted label strings.
    ///
    /// Names without an indexed rule become external repository labels.
    /// Duplicate names resolve (and appear) once per occurrence.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        let mut labels: Vec<String> = names
            .iter()
            .map(|name| self.resolve_one(name.as_ref()))
            .collect();
        labels.sort();
        labels
    }

    /// Resolve the label of the package the rules belong to.
    ///
    /// Unlike dependencies, the package itself must be indexed exactly once.
    pub fn resolve_own(&self, name: &str) -> Result<String, ResolveError> {
        let candidates = self.lookup.find(R_LANG, name);
        if let [label] = candidates.as_slice() {
            return Ok(self.relative(label));
        }
        Err(ResolveError::OwnIdentity {
            package: name.to_string(),
            candidates,
        })
    }

    fn resolve_one(&self, name: &str) -> String {
        let candidates = self.lookup.find(R_LANG, name);
        let Some(first) = candidates.first() else {
            return external_label(self.external_prefix, name);
        };

        if candidates.len() > 1 {
            let found: Vec<String> = candidates.iter().map(Label::to_string).collect();
            tracing::warn!(
                "multiple resolutions found for R package `{}`: {}; using {}",
                name,
                found.join(", "),
                first
            );
        }

        self.relative(first)
    }

    fn relative(&self, label: &Label) -> String {
        let mut label = label.clone();
        if label.name.is_empty() {
            // The indexer could not read the rule name; guess it from the package path.
            label.name = label.pkg_basename().to_string();
        }
        label.rel(&self.from.repo, &self.from.pkg).to_string()
    }
}

/// Label of an R package that is not built in this repository.
pub fn external_label(prefix: &str, name: &str) -> String {
    format!("@{}{}", prefix, name.replace('.', "_"))
}

/// Resolve `names` for rules at `from`, returning sorted label strings.
pub fn resolve<S, L>(names: &[S], from: &Label, lookup: &L, external_prefix: &str) -> Vec<String>
where
    S: AsRef<str>,
    L: Lookup + ?Sized,
{
    DepResolver::new(lookup, from, external_prefix).resolve(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::index::RuleIndex;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with warnings routed into a buffer, returning its result and the log text.
    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (result, logs)
    }

    fn index() -> RuleIndex {
        let mut index = RuleIndex::new();
        index.insert(R_LANG, "foo", Label::local("pkgs/foo", "foo"));
        index.insert(R_LANG, "bar", Label::local("pkgs/bar", "bar"));
        index.insert(R_LANG, "self", Label::local("pkgs/self", "self"));
        index
    }

    fn from() -> Label {
        Label::local("pkgs/self", "self")
    }

    #[test]
    fn test_resolve_sorted() {
        let from = from();
        let got = resolve(&["foo", "zlibR", "bar", "self"], &from, &index(), "R_");
        assert_eq!(got, vec!["//pkgs/bar", "//pkgs/foo", ":self", "@R_zlibR"]);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let from = from();
        let names = ["foo", "bar", "stats.utils"];
        let first = resolve(&names, &from, &index(), "R_");
        let second = resolve(&names, &from, &index(), "R_");
        assert_eq!(first, second);
    }

    #[test]
    fn test_external_replaces_dots() {
        let from = from();
        let got = resolve(&["stats.utils"], &from, &index(), "R_");
        assert_eq!(got, vec!["@R_stats_utils"]);
        assert_eq!(external_label("cran_", "data.table"), "@cran_data_table");
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let from = from();
        let got = resolve(&["foo", "foo"], &from, &index(), "R_");
        assert_eq!(got, vec!["//pkgs/foo", "//pkgs/foo"]);
    }

    #[test]
    fn test_ambiguous_picks_first_candidate() {
        let mut index = RuleIndex::new();
        index.insert(R_LANG, "dup", Label::local("z/dup", "dup"));
        index.insert(R_LANG, "dup", Label::local("a/dup", "dup"));

        let from = from();
        let (got, logs) = capture_warnings(|| resolve(&["dup"], &from, &index, "R_"));
        assert_eq!(got, vec!["//z/dup"]);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("multiple resolutions found for R package `dup`"));
        assert!(logs.contains("//z/dup, //a/dup; using //z/dup"));
    }

    #[test]
    fn test_single_candidate_does_not_warn() {
        let from = from();
        let (got, logs) = capture_warnings(|| resolve(&["foo"], &from, &index(), "R_"));
        assert_eq!(got, vec!["//pkgs/foo"]);
        assert!(logs.is_empty());
    }

    #[test]
    fn test_missing_rule_name_uses_package_basename() {
        let mut index = RuleIndex::new();
        index.insert(R_LANG, "baz", Label::local("third_party/baz", ""));

        let from = from();
        let got = resolve(&["baz"], &from, &index, "R_");
        assert_eq!(got, vec!["//third_party/baz"]);
    }

    #[test]
    fn test_other_repository_is_fully_qualified() {
        let lookup = |_: &str, name: &str| vec![Label::new("vendored", "r", name)];
        let from = from();
        let got = resolve(&["qux"], &from, &lookup, "R_");
        assert_eq!(got, vec!["@vendored//r:qux"]);
    }

    #[test]
    fn test_resolve_own() {
        let index = index();
        let from = from();
        let resolver = DepResolver::new(&index, &from, "R_");
        assert_eq!(resolver.resolve_own("self").unwrap(), ":self");
    }

    #[test]
    fn test_resolve_own_rejects_ambiguity() {
        let mut index = index();
        index.insert(R_LANG, "self", Label::local("copy/self", "self"));

        let from = from();
        let resolver = DepResolver::new(&index, &from, "R_");
        let err = resolver.resolve_own("self").unwrap_err();
        match err {
            ResolveError::OwnIdentity {
                package,
                candidates,
            } => {
                assert_eq!(package, "self");
                assert_eq!(candidates.len(), 2);
            }
        }
    }

    #[test]
    fn test_resolve_own_rejects_missing() {
        let index = RuleIndex::new();
        let from = from();
        let resolver = DepResolver::new(&index, &from, "R_");
        assert!(matches!(
            resolver.resolve_own("self"),
            Err(ResolveError::OwnIdentity { ref candidates, .. }) if candidates.is_empty()
        ));
    }
}
