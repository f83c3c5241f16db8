//! `razel resolve` command

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::cli::ResolveArgs;
use razel::core::MANIFEST_NAME;
use razel::ops::index::{index_packages, package_label};
use razel::ops::{resolve_package, ImportsError, PackageImports};
use razel::util::config::{global_config_path, load_config, project_config_path, Config};
use razel::util::diagnostic::suggestions;
use razel::util::RConfig;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("failed to access root: {}", args.root.display()))?;
    let pkg_dir = args
        .package_dir
        .canonicalize()
        .with_context(|| format!("failed to access package: {}", args.package_dir.display()))?;

    let config = load_r_config(&args, &root, &pkg_dir)?;

    let manifest_path = pkg_dir.join(MANIFEST_NAME);
    if !manifest_path.is_file() {
        return Err(anyhow!(
            "no {} in {}\n{}",
            MANIFEST_NAME,
            pkg_dir.display(),
            suggestions::NO_MANIFEST
        ));
    }

    let imports = PackageImports::from_manifest_path(&manifest_path, &config).map_err(|e| {
        let missing = matches!(
            e.downcast_ref::<ImportsError>(),
            Some(ImportsError::MissingPackage)
        );
        if missing {
            anyhow!("{:#}\n{}", e, suggestions::MISSING_PACKAGE_FIELD)
        } else {
            e
        }
    })?;
    let index = index_packages(&root)?;
    let from = package_label(&root, &pkg_dir, &imports.pkg_name);
    tracing::debug!("resolving {} from {}", imports.pkg_name, from);

    let resolved = resolve_package(&imports, &index, &from, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    println!("package: {}", resolved.pkg_label);
    println!("deps:");
    for label in &resolved.deps {
        println!("  {}", label);
    }
    println!("suggested_deps:");
    for label in &resolved.suggested_deps {
        println!("  {}", label);
    }

    Ok(())
}

/// Layer config files, build file directives and command-line overrides
/// onto the defaults.
fn load_r_config(args: &ResolveArgs, root: &Path, pkg_dir: &Path) -> Result<RConfig> {
    let config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => load_config(global_config_path().as_deref(), &project_config_path(root)),
    };

    let mut r_config = RConfig::default()
        .apply(&config.r)
        .configure_dirs(root, pkg_dir)?;
    if let Some(ref prefix) = args.external_dep_prefix {
        r_config.external_dep_prefix = prefix.clone();
    }
    if let Some(ref pkgs) = args.installed_pkgs {
        r_config.installed_pkgs = pkgs.clone();
    }
    Ok(r_config)
}
