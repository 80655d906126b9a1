#![deny(missing_docs)]

//! # Document Module
//!
//! - **shims**: serde structures for Swagger 2.0 / OpenAPI 3.x documents.
//! - **refs**: `$ref` name extraction.
//! - **operations**: per-operation parameter collection.

pub mod operations;
pub mod refs;
pub mod shims;

pub use operations::{collect_operations, OperationParameters, BODY_PARAMETER_NAME};
pub use refs::extract_ref_name;
pub use shims::{
    AdditionalProperties, Extra, ShimComponents, ShimDocument, ShimMediaType, ShimOperation,
    ShimParameter, ShimPathItem, ShimPaths, ShimRequestBody, ShimSchema, TypeDecl,
};
