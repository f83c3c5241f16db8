//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use razel::util::StringSet;

/// razel - build-graph metadata extraction for R packages
#[derive(Parser)]
#[command(name = "razel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the fields of a DESCRIPTION file
    Parse(ParseArgs),

    /// Print the package names declared in dependency fields
    Deps(DepsArgs),

    /// Resolve a package's dependencies into build labels
    Resolve(ResolveArgs),

    /// List package files, minus those matching exclude patterns
    Files(FilesArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Path to the DESCRIPTION file
    pub file: PathBuf,

    /// Print fields as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Path to the DESCRIPTION file
    pub file: PathBuf,

    /// Read the Suggests field instead of Depends, Imports and LinkingTo
    #[arg(long)]
    pub suggested: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Package directory containing the DESCRIPTION file
    pub package_dir: PathBuf,

    /// Repository root to index packages under
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Config file to use instead of the global and project config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Prefix for repository names of external packages
    #[arg(long, env = "RAZEL_EXTERNAL_DEP_PREFIX")]
    pub external_dep_prefix: Option<String>,

    /// Packages assumed installed on the build machine (comma-separated)
    #[arg(long)]
    pub installed_pkgs: Option<StringSet>,

    /// Print labels as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FilesArgs {
    /// Directory to list
    pub dir: PathBuf,

    /// File of exclude patterns, one regular expression per line
    #[arg(long = "exclude-file")]
    pub exclude_files: Vec<PathBuf>,
}
