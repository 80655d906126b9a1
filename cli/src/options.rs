#![deny(missing_docs)]

//! # Shared Options
//!
//! Backend configuration flags and document loading shared by every command.

use std::fs;
use std::path::{Path, PathBuf};

use oasparam_core::{RustBackend, RustBackendConfig, ShimDocument};

use crate::error::{CliError, CliResult};

/// Flags configuring the Rust backend.
#[derive(clap::Args, Debug, Clone)]
pub struct BackendArgs {
    /// Type used for file uploads.
    #[clap(long, env = "OASPARAM_FILE_TYPE", default_value = oasparam_core::backend::rust::DEFAULT_FILE_TYPE)]
    pub file_type: String,

    /// Vendor extension prefixes, most specific first (comma separated).
    #[clap(
        long = "vendor-prefix",
        env = "OASPARAM_VENDOR_PREFIX",
        value_delimiter = ',',
        default_value = "x-rust,x-oasparam"
    )]
    pub vendor_prefixes: Vec<String>,
}

impl BackendArgs {
    /// Builds the backend these flags describe.
    pub fn backend(&self) -> CliResult<RustBackend> {
        let config = RustBackendConfig {
            file_type: self.file_type.clone(),
            vendor_prefixes: self.vendor_prefixes.clone(),
        };
        Ok(RustBackend::new(config)?)
    }
}

/// The API description to read.
#[derive(clap::Args, Debug, Clone)]
pub struct SpecArgs {
    /// Path to a Swagger 2.0 / OpenAPI 3.x document (YAML or JSON).
    #[clap(long, short = 's')]
    pub spec: PathBuf,
}

/// Reads and parses a document.
pub fn load_document(path: &Path) -> CliResult<ShimDocument> {
    if !path.exists() {
        return Err(CliError::General(format!(
            "OpenAPI file not found: {:?}",
            path
        )));
    }
    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Loaded document");
    Ok(ShimDocument::parse(&content)?)
}
