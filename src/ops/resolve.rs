//! Resolving a package's imports into labels.

use serde::Serialize;

use crate::core::Label;
use crate::ops::imports::PackageImports;
use crate::resolver::{DepResolver, Lookup, ResolveError};
use crate::util::config::RConfig;

/// Labels for the rules generated from one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPackage {
    /// The package's own label
    pub pkg_label: String,
    /// Sorted labels of required packages
    pub deps: Vec<String>,
    /// Sorted labels of suggested packages
    pub suggested_deps: Vec<String>,
}

/// Resolve the labels for rules at `from` generated from `imports`.
///
/// Fails if the package itself is not indexed exactly once.
pub fn resolve_package<L: Lookup + ?Sized>(
    imports: &PackageImports,
    lookup: &L,
    from: &Label,
    config: &RConfig,
) -> Result<ResolvedPackage, ResolveError> {
    let resolver = DepResolver::new(lookup, from, &config.external_dep_prefix);

    let pkg_label = resolver.resolve_own(&imports.pkg_name)?;
    let deps = resolver.resolve(&imports.pkg_deps);
    let suggested_deps = resolver.resolve(&imports.pkg_suggested_deps);

    tracing::debug!(
        "resolved {}: {} deps, {} suggested",
        imports.pkg_name,
        deps.len(),
        suggested_deps.len()
    );

    Ok(ResolvedPackage {
        pkg_label,
        deps,
        suggested_deps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_dcf_str;
    use crate::ops::index::{index_packages, package_label};
    use crate::resolver::{RuleIndex, R_LANG};
    use crate::test_support::PackageFixture;

    fn imports(description: &str) -> PackageImports {
        let fields = parse_dcf_str(description).unwrap();
        PackageImports::from_fields(&fields, &RConfig::default()).unwrap()
    }

    #[test]
    fn test_resolve_package() {
        let mut index = RuleIndex::new();
        index.insert(R_LANG, "exampleA", Label::local("packages/exampleA", "exampleA"));
        index.insert(R_LANG, "exampleB", Label::local("packages/exampleB", "exampleB"));

        let imports = imports(
            "Package: exampleA\nImports: exampleB, data.table, stats\nSuggests: testthat\n",
        );
        let from = Label::local("packages/exampleA", "exampleA");
        let resolved = resolve_package(&imports, &index, &from, &RConfig::default()).unwrap();

        assert_eq!(resolved.pkg_label, ":exampleA");
        assert_eq!(resolved.deps, vec!["//packages/exampleB", "@R_data_table"]);
        assert_eq!(resolved.suggested_deps, vec!["@R_testthat"]);
    }

    #[test]
    fn test_resolve_indexed_tree() {
        let tmp = tempfile::TempDir::new().unwrap();
        let manifest = PackageFixture::new("app", "apps/app")
            .depends("R (>= 4.0), utils")
            .imports("core (>= 1.0), jsonlite")
            .suggests("testthat, helpers")
            .write(tmp.path());
        PackageFixture::new("core", "libs/core").write(tmp.path());
        PackageFixture::new("helpers", "libs/test-helpers")
            .imports("core")
            .write(tmp.path());

        let config = RConfig::default();
        let index = index_packages(tmp.path()).unwrap();
        let imports = PackageImports::from_manifest_path(&manifest, &config).unwrap();
        let from = package_label(tmp.path(), &tmp.path().join("apps/app"), "app");

        let resolved = resolve_package(&imports, &index, &from, &config).unwrap();
        assert_eq!(resolved.pkg_label, ":app");
        assert_eq!(resolved.deps, vec!["//libs/core", "@R_jsonlite"]);
        assert_eq!(
            resolved.suggested_deps,
            vec!["//libs/test-helpers", "@R_testthat"]
        );
    }

    #[test]
    fn test_resolve_package_uses_configured_prefix() {
        let mut index = RuleIndex::new();
        index.insert(R_LANG, "a", Label::local("a", "a"));

        let config = RConfig {
            external_dep_prefix: "cran_".to_string(),
            ..RConfig::default()
        };
        let from = Label::local("a", "a");
        let resolved = resolve_package(&imports("Package: a\nDepends: zoo\n"), &index, &from, &config)
            .unwrap();
        assert_eq!(resolved.deps, vec!["@cran_zoo"]);
    }

    #[test]
    fn test_resolve_package_requires_own_label() {
        let mut index = RuleIndex::new();
        index.insert(R_LANG, "a", Label::local("x/a", "a"));
        index.insert(R_LANG, "a", Label::local("y/a", "a"));

        let from = Label::local("x/a", "a");
        let err = resolve_package(&imports("Package: a\n"), &index, &from, &RConfig::default())
            .unwrap_err();
        assert!(matches!(err, ResolveError::OwnIdentity { .. }));
    }
}
