//! Import lookup used by the resolver.

use std::collections::HashMap;

use crate::core::Label;

/// Read-only mapping from (language, import name) to rules providing it.
///
/// Implementations must return candidates in a stable order: the resolver
/// picks the first one when several match.
pub trait Lookup {
    /// Find the rules that provide `import` for language `lang`.
    fn find(&self, lang: &str, import: &str) -> Vec<Label>;
}

impl<F> Lookup for F
where
    F: Fn(&str, &str) -> Vec<Label>,
{
    fn find(&self, lang: &str, import: &str) -> Vec<Label> {
        self(lang, import)
    }
}

/// In-memory rule index.
///
/// Candidates are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    rules: HashMap<(String, String), Vec<Label>>,
}

impl RuleIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `label` provides `import` for `lang`.
    pub fn insert(&mut self, lang: impl Into<String>, import: impl Into<String>, label: Label) {
        self.rules
            .entry((lang.into(), import.into()))
            .or_default()
            .push(label);
    }

    /// Number of distinct imports indexed.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Lookup for RuleIndex {
    fn find(&self, lang: &str, import: &str) -> Vec<Label> {
        self.rules
            .get(&(lang.to_string(), import.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
