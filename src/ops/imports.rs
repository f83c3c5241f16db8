//! Package imports read from a DESCRIPTION file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use crate::core::{parse_dcf_file, parse_deps, DependencyName, FormatError, ManifestFields};
use crate::util::config::RConfig;

/// Field holding the package name.
pub const PACKAGE_FIELD: &str = "Package";

/// Fields listing packages required to build and load the package.
pub const DEPS_FIELDS: &[&str] = &["Depends", "Imports", "LinkingTo"];

/// Field listing packages used only by tests, examples and vignettes.
pub const SUGGESTS_FIELD: &str = "Suggests";

/// Pseudo-package naming the R version requirement in `Depends`.
const R_PSEUDO_PACKAGE: &str = "R";

/// Error extracting imports from manifest fields.
#[derive(Debug, Error)]
pub enum ImportsError {
    #[error("manifest has no `Package` field")]
    MissingPackage,

    #[error("in field `{field}`: {source}")]
    Deps {
        field: String,
        #[source]
        source: FormatError,
    },
}

/// What a package is called and which packages it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageImports {
    /// Package name
    pub pkg_name: String,
    /// Dependencies from `Depends`, `Imports` and `LinkingTo`, in field order
    pub pkg_deps: Vec<DependencyName>,
    /// Dependencies from `Suggests`
    pub pkg_suggested_deps: Vec<DependencyName>,
}

impl PackageImports {
    /// Extract imports from parsed manifest fields.
    ///
    /// The `R` pseudo-package and packages the configuration assumes
    /// installed are dropped, since they need no label.
    pub fn from_fields(fields: &ManifestFields, config: &RConfig) -> Result<Self, ImportsError> {
        let pkg_name = fields
            .get(PACKAGE_FIELD)
            .filter(|name| !name.is_empty())
            .ok_or(ImportsError::MissingPackage)?
            .to_string();

        let mut pkg_deps = Vec::new();
        for field in DEPS_FIELDS {
            pkg_deps.extend(field_deps(fields, field, config)?);
        }
        let pkg_suggested_deps = field_deps(fields, SUGGESTS_FIELD, config)?;

        Ok(PackageImports {
            pkg_name,
            pkg_deps,
            pkg_suggested_deps,
        })
    }

    /// Read and extract imports from a DESCRIPTION file.
    pub fn from_manifest_path(path: &Path, config: &RConfig) -> Result<Self> {
        let fields = parse_dcf_file(path)?;
        Self::from_fields(&fields, config)
            .with_context(|| format!("reading imports from {}", path.display()))
    }
}

fn field_deps(
    fields: &ManifestFields,
    field: &str,
    config: &RConfig,
) -> Result<Vec<DependencyName>, ImportsError> {
    let Some(value) = fields.get(field) else {
        return Ok(Vec::new());
    };

    let deps = parse_deps(value).map_err(|source| ImportsError::Deps {
        field: field.to_string(),
        source,
    })?;

    Ok(deps
        .into_iter()
        .filter(|dep| dep.as_str() != R_PSEUDO_PACKAGE && !config.is_installed(dep.as_str()))
        .collect())
}
