#![deny(missing_docs)]

//! # OASParam CLI
//!
//! Command Line Interface for the parameter resolution core.
//!
//! Supported Commands:
//! - `resolve`: Resolves every operation's parameters into Rust signatures.
//! - `catalog`: Lists the named models, enums and aliases of a document.

use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod catalog;
mod error;
mod options;
mod report;
mod resolve;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI parameter resolver")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[clap(long, short = 'v', global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve every operation's parameters.
    Resolve(resolve::ResolveArgs),
    /// Print the catalog of named definitions.
    Catalog(catalog::CatalogArgs),
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Resolve(args) => resolve::execute(args, &mut out)?,
        Commands::Catalog(args) => catalog::execute(args, &mut out)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_resolve_flags() {
        let cli = Cli::try_parse_from([
            "oasparam",
            "-v",
            "resolve",
            "--spec",
            "api.yaml",
            "--format",
            "json",
            "--keep-going",
            "--vendor-prefix",
            "x-a,x-b",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.format, report::OutputFormat::Json);
        assert!(args.keep_going);
        assert_eq!(args.backend.vendor_prefixes, vec!["x-a", "x-b"]);
    }
}
