#![deny(missing_docs)]

//! # Catalog Command
//!
//! Prints the protocol catalog built from a document's named schemas.

use std::io::Write;

use oasparam_core::{build_catalog, ProtocolElem};

use crate::error::CliResult;
use crate::options::{load_document, BackendArgs, SpecArgs};

/// Arguments for the catalog command.
#[derive(clap::Args, Debug, Clone)]
pub struct CatalogArgs {
    #[clap(flatten)]
    pub spec: SpecArgs,

    #[clap(flatten)]
    pub backend: BackendArgs,
}

/// Executes the catalog command, writing one line per definition to `out`.
pub fn execute(args: &CatalogArgs, out: &mut impl Write) -> CliResult<()> {
    let doc = load_document(&args.spec.spec)?;
    let backend = args.backend.backend()?;
    let catalog = build_catalog(backend.capabilities(), &doc.schema_definitions())?;

    for elem in catalog.iter() {
        match elem {
            ProtocolElem::Model(model) => {
                writeln!(out, "model {} -> {}", model.name, model.tpe)?;
            }
            ProtocolElem::Alias(alias) => {
                writeln!(out, "alias {} -> {}", alias.name, alias.tpe)?;
            }
            ProtocolElem::Enum(definition) => {
                let members: Vec<String> = definition
                    .members
                    .iter()
                    .map(|(raw, ident)| format!("{}={}", raw, ident))
                    .collect();
                writeln!(
                    out,
                    "enum {} -> {} [{}]",
                    definition.name,
                    definition.tpe,
                    members.join(", ")
                )?;
            }
        }
    }
    tracing::info!(definitions = catalog.len(), "Built catalog");
    Ok(())
}
