//! Configuration support for razel.
//!
//! Settings come from three layers, lowest precedence first:
//! - Built-in defaults (`Defaults`)
//! - Config files: global `~/.razel/config.toml`, then project `.razel/config.toml`
//! - Directives read from `# gazelle:` comments in build files, applied from
//!   the tree root down to the package (`RConfig::configure_dirs`)
//!
//! Every layer produces a new `RConfig`; existing values are never mutated
//! through a shared reference.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::string_set::StringSet;

/// Default prefix for repositories of external R packages.
pub const DEFAULT_EXTERNAL_DEP_PREFIX: &str = "R_";

/// Directives understood by `RConfig::configure`.
pub const KNOWN_DIRECTIVES: &[&str] = &[
    "r_generate_rules",
    "r_external_dep_prefix",
    "r_add_test_rules",
    "r_srcs_use_globs",
    "r_roclets",
    "r_roclets_deps",
    "r_roclets_include_pkg_deps",
];

/// Comment prefix marking a directive in a build file.
pub const DIRECTIVE_PREFIX: &str = "# gazelle:";

/// Build file names searched for directives, in order.
pub const BUILD_FILE_NAMES: &[&str] = &["BUILD.bazel", "BUILD"];

/// Packages shipped with every R installation.
const BASE_PACKAGES: &[&str] = &[
    "base",
    "compiler",
    "datasets",
    "graphics",
    "grDevices",
    "grid",
    "methods",
    "parallel",
    "splines",
    "stats",
    "stats4",
    "tcltk",
    "tools",
    "translations",
    "utils",
];

/// Built-in default tables.
///
/// Passed explicitly so callers and tests can substitute their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Packages assumed installed on the build machine
    pub installed_pkgs: StringSet,
    /// Extra dependencies needed to run roclets
    pub roclets_deps: StringSet,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            installed_pkgs: BASE_PACKAGES.iter().copied().collect(),
            roclets_deps: StringSet::parse("@R_roxygen2"),
        }
    }
}

/// A `key value` configuration directive read from a build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: String,
}

impl Directive {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Directive {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Read the R directives from the contents of a build file.
///
/// Directives for other extensions are skipped.
pub fn parse_directives(content: &str) -> Vec<Directive> {
    content
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix(DIRECTIVE_PREFIX)?;
            let (key, value) = match rest.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim()),
                None => (rest, ""),
            };
            KNOWN_DIRECTIVES
                .contains(&key)
                .then(|| Directive::new(key, value))
        })
        .collect()
}

/// Read directives from the build file in `dir`, returning the file's path.
pub fn read_directives(dir: &Path) -> Result<Option<(PathBuf, Vec<Directive>)>> {
    for name in BUILD_FILE_NAMES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read build file: {}", path.display()))?;
        return Ok(Some((path, parse_directives(&content))));
    }
    Ok(None)
}

/// Effective R configuration for one directory scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RConfig {
    /// Generate rules for R packages
    pub generate_rules: bool,
    /// Prefix for repository names of external packages
    pub external_dep_prefix: String,
    /// Add r_unit_test and r_pkg_test rules
    pub add_test_rules: bool,
    /// Packages assumed installed on the build machine
    pub installed_pkgs: StringSet,
    /// Use glob expressions for the srcs attribute
    pub srcs_use_globs: bool,
    /// Roclets to run when building the source archive
    pub roclets: StringSet,
    /// Additional dependencies for running roclets
    pub roclets_deps: StringSet,
    /// Also include package deps when running roclets
    pub roclets_include_pkg_deps: bool,
    /// Variable assignments to delete from build files
    pub delete_assignments: StringSet,
}

impl Default for RConfig {
    fn default() -> Self {
        RConfig::with_defaults(&Defaults::default())
    }
}

impl RConfig {
    /// Create a configuration from the given default tables.
    pub fn with_defaults(defaults: &Defaults) -> Self {
        RConfig {
            generate_rules: true,
            external_dep_prefix: DEFAULT_EXTERNAL_DEP_PREFIX.to_string(),
            add_test_rules: true,
            installed_pkgs: defaults.installed_pkgs.clone(),
            srcs_use_globs: false,
            roclets: StringSet::new(),
            roclets_deps: defaults.roclets_deps.clone(),
            roclets_include_pkg_deps: true,
            delete_assignments: StringSet::new(),
        }
    }

    /// Check if a package is assumed installed and needs no label.
    pub fn is_installed(&self, pkg: &str) -> bool {
        self.installed_pkgs.contains(pkg)
    }

    /// Configuration for a nested scope with `directives` applied.
    ///
    /// Unknown directives are ignored. Boolean values that fail to parse
    /// are logged and read as `false`.
    pub fn configure(&self, directives: &[Directive], path: &Path) -> RConfig {
        let mut cfg = self.clone();
        for d in directives {
            match d.key.as_str() {
                "r_generate_rules" => cfg.generate_rules = parse_bool_directive(d, path),
                "r_external_dep_prefix" => cfg.external_dep_prefix = d.value.clone(),
                "r_add_test_rules" => cfg.add_test_rules = parse_bool_directive(d, path),
                "r_srcs_use_globs" => cfg.srcs_use_globs = parse_bool_directive(d, path),
                "r_roclets" => cfg.roclets = StringSet::parse(&d.value),
                "r_roclets_deps" => cfg.roclets_deps = StringSet::parse(&d.value),
                "r_roclets_include_pkg_deps" => {
                    cfg.roclets_include_pkg_deps = parse_bool_directive(d, path)
                }
                _ => {}
            }
        }
        cfg
    }

    /// Configuration for `dir` with the build file directives of every
    /// directory from `root` down to `dir` applied in turn.
    ///
    /// A `dir` outside `root` only sees its own build file.
    pub fn configure_dirs(&self, root: &Path, dir: &Path) -> Result<RConfig> {
        let scopes: Vec<PathBuf> = match dir.strip_prefix(root) {
            Ok(rel) => std::iter::once(root.to_path_buf())
                .chain(rel.components().scan(root.to_path_buf(), |current, c| {
                    current.push(c);
                    Some(current.clone())
                }))
                .collect(),
            Err(_) => vec![dir.to_path_buf()],
        };

        let mut cfg = self.clone();
        for scope in &scopes {
            if let Some((path, directives)) = read_directives(scope)? {
                tracing::debug!("{} directive(s) in {}", directives.len(), path.display());
                cfg = cfg.configure(&directives, &path);
            }
        }
        Ok(cfg)
    }

    /// Configuration with the settings from a config file applied.
    pub fn apply(&self, settings: &RSettings) -> RConfig {
        let mut cfg = self.clone();
        if let Some(v) = settings.generate_rules {
            cfg.generate_rules = v;
        }
        if let Some(ref v) = settings.external_dep_prefix {
            cfg.external_dep_prefix = v.clone();
        }
        if let Some(v) = settings.add_test_rules {
            cfg.add_test_rules = v;
        }
        if let Some(ref v) = settings.installed_pkgs {
            cfg.installed_pkgs = v.clone();
        }
        if let Some(v) = settings.srcs_use_globs {
            cfg.srcs_use_globs = v;
        }
        if let Some(ref v) = settings.roclets {
            cfg.roclets = v.clone();
        }
        if let Some(ref v) = settings.roclets_deps {
            cfg.roclets_deps = v.clone();
        }
        if let Some(v) = settings.roclets_include_pkg_deps {
            cfg.roclets_include_pkg_deps = v;
        }
        if let Some(ref v) = settings.delete_assignments {
            cfg.delete_assignments = v.clone();
        }
        cfg
    }
}

fn parse_bool_directive(d: &Directive, path: &Path) -> bool {
    parse_bool(&d.value).unwrap_or_else(|| {
        tracing::warn!(
            "in {}, unable to parse bool value for {}: {:?}",
            path.display(),
            d.key,
            d.value
        );
        false
    })
}

/// Parse a boolean the way build-file directives spell them.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// razel configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// R rule generation settings
    pub r: RSettings,
}

/// R settings from a config file. Unset values leave the lower layer alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RSettings {
    pub generate_rules: Option<bool>,
    pub external_dep_prefix: Option<String>,
    pub add_test_rules: Option<bool>,
    pub installed_pkgs: Option<StringSet>,
    pub srcs_use_globs: Option<bool>,
    pub roclets: Option<StringSet>,
    pub roclets_deps: Option<StringSet>,
    pub roclets_include_pkg_deps: Option<bool>,
    pub delete_assignments: Option<StringSet>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let r = other.r;
        if r.generate_rules.is_some() {
            self.r.generate_rules = r.generate_rules;
        }
        if r.external_dep_prefix.is_some() {
            self.r.external_dep_prefix = r.external_dep_prefix;
        }
        if r.add_test_rules.is_some() {
            self.r.add_test_rules = r.add_test_rules;
        }
        if r.installed_pkgs.is_some() {
            self.r.installed_pkgs = r.installed_pkgs;
        }
        if r.srcs_use_globs.is_some() {
            self.r.srcs_use_globs = r.srcs_use_globs;
        }
        if r.roclets.is_some() {
            self.r.roclets = r.roclets;
        }
        if r.roclets_deps.is_some() {
            self.r.roclets_deps = r.roclets_deps;
        }
        if r.roclets_include_pkg_deps.is_some() {
            self.r.roclets_include_pkg_deps = r.roclets_include_pkg_deps;
        }
        if r.delete_assignments.is_some() {
            self.r.delete_assignments = r.delete_assignments;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.razel/config.toml)
/// 2. Global config (~/.razel/config.toml)
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }
    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global razel config directory (~/.razel).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".razel"))
}

/// Get the global config path (~/.razel/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.razel/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".razel").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cfg = RConfig::default();
        assert!(cfg.generate_rules);
        assert!(cfg.add_test_rules);
        assert!(!cfg.srcs_use_globs);
        assert!(cfg.roclets_include_pkg_deps);
        assert_eq!(cfg.external_dep_prefix, "R_");
        assert!(cfg.is_installed("stats"));
        assert!(!cfg.is_installed("Rcpp"));
        assert!(cfg.roclets_deps.contains("@R_roxygen2"));
    }

    #[test]
    fn test_substitute_defaults() {
        let defaults = Defaults {
            installed_pkgs: StringSet::parse("Rcpp"),
            roclets_deps: StringSet::new(),
        };
        let cfg = RConfig::with_defaults(&defaults);
        assert!(cfg.is_installed("Rcpp"));
        assert!(!cfg.is_installed("stats"));
        assert!(cfg.roclets_deps.is_empty());
    }

    #[test]
    fn test_configure_returns_new_scope() {
        let parent = RConfig::default();
        let child = parent.configure(
            &[
                Directive::new("r_external_dep_prefix", "cran_"),
                Directive::new("r_srcs_use_globs", "true"),
                Directive::new("r_roclets", "rd,namespace"),
                Directive::new("go_prefix", "ignored"),
            ],
            Path::new("BUILD.bazel"),
        );

        assert_eq!(child.external_dep_prefix, "cran_");
        assert!(child.srcs_use_globs);
        assert_eq!(child.roclets.to_string(), "namespace,rd");

        assert_eq!(parent.external_dep_prefix, "R_");
        assert!(parent.roclets.is_empty());
    }

    #[test]
    fn test_bad_bool_directive_reads_false() {
        let cfg = RConfig::default().configure(
            &[Directive::new("r_generate_rules", "yes please")],
            Path::new("BUILD"),
        );
        assert!(!cfg.generate_rules);
    }

    #[test]
    fn test_parse_directives() {
        let content = "\
# gazelle:r_external_dep_prefix cran_
#gazelle:r_generate_rules false
  # gazelle:r_roclets  rd, namespace
# gazelle:go_prefix example.com/x
# gazelle:r_srcs_use_globs
r_library(name = \"x\")
";
        assert_eq!(
            parse_directives(content),
            vec![
                Directive::new("r_external_dep_prefix", "cran_"),
                Directive::new("r_roclets", "rd, namespace"),
                Directive::new("r_srcs_use_globs", ""),
            ]
        );
    }

    #[test]
    fn test_configure_dirs_inherits_from_parents() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let pkg = root.join("pkgs/foo");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(
            root.join("BUILD.bazel"),
            "# gazelle:r_external_dep_prefix cran_\n# gazelle:r_add_test_rules false\n",
        )
        .unwrap();
        std::fs::write(
            root.join("pkgs/BUILD"),
            "# gazelle:r_external_dep_prefix rpkg_\n",
        )
        .unwrap();

        let base = RConfig::default();
        let cfg = base.configure_dirs(root, &pkg).unwrap();
        assert_eq!(cfg.external_dep_prefix, "rpkg_");
        assert!(!cfg.add_test_rules);
        assert_eq!(base.external_dep_prefix, DEFAULT_EXTERNAL_DEP_PREFIX);

        let top = base.configure_dirs(root, root).unwrap();
        assert_eq!(top.external_dep_prefix, "cran_");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("T"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[r]
external_dep_prefix = "cran_"
add_test_rules = false
installed_pkgs = ["base", "utils"]
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[r]
external_dep_prefix = "R_"
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);
        let cfg = RConfig::default().apply(&config.r);

        assert_eq!(cfg.external_dep_prefix, "R_");
        assert!(!cfg.add_test_rules);
        assert_eq!(cfg.installed_pkgs.to_string(), "base,utils");
    }

    #[test]
    fn test_missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert_eq!(RConfig::default().apply(&config.r), RConfig::default());
    }
}
