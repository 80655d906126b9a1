#![deny(missing_docs)]

//! # Resolution Report
//!
//! Serializable summary of a `DocumentResolution`, rendered as text or JSON.

use std::io::Write;

use oasparam_core::{DocumentResolution, LanguageParameter, RustLanguage};
use serde::Serialize;

use crate::error::CliResult;

/// Output format selected on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// One resolved parameter.
#[derive(Debug, Serialize)]
pub struct ParameterReport {
    /// Wire name.
    pub name: String,
    /// Wire location, if declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Generated identifier.
    pub identifier: String,
    /// Final Rust type.
    #[serde(rename = "type")]
    pub tpe: String,
    /// Default expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Declared `(type, format)`.
    pub raw_type: String,
    /// Required flag.
    pub required: bool,
    /// File upload flag.
    pub file: bool,
    /// Hash algorithm hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_algorithm: Option<String>,
}

impl From<&LanguageParameter<RustLanguage>> for ParameterReport {
    fn from(param: &LanguageParameter<RustLanguage>) -> Self {
        Self {
            name: param.arg_name().to_string(),
            location: param.location().map(ToString::to_string),
            identifier: param.param_name().to_string(),
            tpe: param.arg_type().to_string(),
            default: param.default_value().map(ToString::to_string),
            raw_type: param.raw_type().to_string(),
            required: param.required(),
            file: param.is_file(),
            hash_algorithm: param.hash_algorithm().map(str::to_string),
        }
    }
}

/// One operation.
#[derive(Debug, Serialize)]
pub struct OperationReport {
    /// Path template.
    pub path: String,
    /// HTTP method.
    pub method: String,
    /// `operationId`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterReport>,
}

/// A parameter that failed to resolve.
#[derive(Debug, Serialize)]
pub struct FailureReport {
    /// Path template.
    pub path: String,
    /// HTTP method.
    pub method: String,
    /// Error message.
    pub error: String,
}

/// The whole document.
#[derive(Debug, Serialize)]
pub struct ResolutionReport {
    /// Operations in document order.
    pub operations: Vec<OperationReport>,
    /// Failures collected with `--keep-going`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureReport>,
}

impl From<&DocumentResolution<RustLanguage>> for ResolutionReport {
    fn from(resolution: &DocumentResolution<RustLanguage>) -> Self {
        Self {
            operations: resolution
                .operations
                .iter()
                .map(|op| OperationReport {
                    path: op.path.clone(),
                    method: op.method.clone(),
                    operation_id: op.operation_id.clone(),
                    parameters: op.parameters.parameters.iter().map(Into::into).collect(),
                })
                .collect(),
            failures: resolution
                .failures
                .iter()
                .map(|failure| FailureReport {
                    path: failure.path.clone(),
                    method: failure.method.clone(),
                    error: failure.error.to_string(),
                })
                .collect(),
        }
    }
}

impl ResolutionReport {
    /// Writes the report in the requested format.
    pub fn write(&self, format: OutputFormat, out: &mut impl Write) -> CliResult<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
            OutputFormat::Text => self.write_text(out)?,
        }
        Ok(())
    }

    fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        for op in &self.operations {
            write!(out, "{} {}", op.method.to_uppercase(), op.path)?;
            if let Some(id) = &op.operation_id {
                write!(out, " ({})", id)?;
            }
            writeln!(out)?;
            for param in &op.parameters {
                write!(out, "  {}: {}", param.identifier, param.tpe)?;
                if let Some(default) = &param.default {
                    write!(out, " = {}", default)?;
                }
                write!(
                    out,
                    " [{} {}]",
                    param.location.as_deref().unwrap_or("?"),
                    param.name
                )?;
                if param.file {
                    write!(out, " file")?;
                }
                if let Some(hash) = &param.hash_algorithm {
                    write!(out, " hash={}", hash)?;
                }
                writeln!(out)?;
            }
        }
        for failure in &self.failures {
            writeln!(
                out,
                "error: {} {}: {}",
                failure.method.to_uppercase(),
                failure.path,
                failure.error
            )?;
        }
        Ok(())
    }
}
