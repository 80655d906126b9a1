#![deny(missing_docs)]

//! # Resolve Command
//!
//! Resolves the parameters of every operation in a document and prints them.

use std::io::Write;

use oasparam_core::{build_catalog, resolve_document, FailurePolicy};

use crate::error::CliResult;
use crate::options::{load_document, BackendArgs, SpecArgs};
use crate::report::{OutputFormat, ResolutionReport};

/// Arguments for the resolve command.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    #[clap(flatten)]
    pub spec: SpecArgs,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Report failing parameters instead of stopping at the first one.
    #[clap(long)]
    pub keep_going: bool,

    #[clap(flatten)]
    pub backend: BackendArgs,
}

/// Executes the resolve command, writing the report to `out`.
pub fn execute(args: &ResolveArgs, out: &mut impl Write) -> CliResult<()> {
    let doc = load_document(&args.spec.spec)?;
    let backend = args.backend.backend()?;
    let caps = backend.capabilities();
    let catalog = build_catalog(caps, &doc.schema_definitions())?;

    let policy = if args.keep_going {
        FailurePolicy::Collect
    } else {
        FailurePolicy::FailFast
    };
    let resolution = resolve_document(caps, &catalog, &doc, policy)?;
    for failure in &resolution.failures {
        tracing::warn!(path = %failure.path, method = %failure.method, "{}", failure.error);
    }
    tracing::info!(
        operations = resolution.operations.len(),
        parameters = resolution.parameter_count(),
        "Resolved document"
    );

    ResolutionReport::from(&resolution).write(args.format, out)
}
