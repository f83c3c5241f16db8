//! razel CLI - build-graph metadata for R packages

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use razel::core::ManifestError;
use razel::resolver::ResolveError;
use razel::util::diagnostic::{emit, Diagnostic};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("razel=debug")
    } else {
        EnvFilter::new("razel=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match cli.command {
        Commands::Parse(args) => commands::parse::execute(args),
        Commands::Deps(args) => commands::deps::execute(args),
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Files(args) => commands::files::execute(args),
    }
}

fn report(e: &anyhow::Error, color: bool) {
    if let Some(err) = e.downcast_ref::<ResolveError>() {
        emit(&err.to_diagnostic(), color);
    } else if let Some(err) = e.downcast_ref::<ManifestError>() {
        emit(&Diagnostic::from(err), color);
    } else {
        eprintln!("error: {:#}", e);
    }
}
