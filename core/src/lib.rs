#![deny(missing_docs)]

//! # OASParam Core
//!
//! Resolves API-operation parameter declarations from Swagger 2.0 / OpenAPI 3.x
//! documents into target-language-ready parameter records.
//!
//! The pipeline is polymorphic over the target language: everything language
//! specific comes from the four capability sets bundled in `backend::Capabilities`.

/// Shared error types.
pub mod error;

/// Provenance-carrying value wrapper.
pub mod tracker;

/// Document shims, `$ref` utilities and the operation walker.
pub mod document;

/// Backend capability traits and the Rust backend.
pub mod backend;

/// Named model and enum definitions.
pub mod catalog;

/// Per-parameter resolution pipeline.
pub mod params;

/// Whole-document resolution.
pub mod resolution;

pub use backend::{
    Capabilities, DocumentAccessors, LanguageTypes, NamingCapability, RustBackend,
    RustBackendConfig, RustLanguage, StandardAccessors, TermCapability, TypeCapability,
};
pub use catalog::{build_catalog, ProtocolCatalog, ProtocolElem};
pub use document::{collect_operations, ShimDocument, ShimParameter, ShimSchema};
pub use error::{AppError, AppResult};
pub use params::{
    deduplicate_identifiers, resolve_parameter, resolve_parameters, LanguageParameter,
    LanguageParameters, ParameterLocation, RawParameterName, RawParameterType, ResolvedType,
};
pub use resolution::{resolve_document, DocumentResolution, FailurePolicy, ResolvedOperation};
pub use tracker::Tracker;
