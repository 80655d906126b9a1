#![deny(missing_docs)]

//! # Params Module
//!
//! Turns parameter nodes into backend-ready `LanguageParameter` records.
//!
//! - **classify**: wire category assignment.
//! - **types**: phase-one type resolution and catalog reconciliation.
//! - **defaults** / **enums**: default literals and enum member promotion.
//! - **optional**: optional wrapping.
//! - **dedup**: identifier collision resolution.
//! - **resolver**: the per-parameter and per-list pipeline.

pub mod classify;
pub mod dedup;
pub mod defaults;
pub mod enums;
pub mod models;
pub mod optional;
pub mod resolver;
pub mod types;

pub use classify::{classify, ParameterCategory};
pub use dedup::deduplicate_identifiers;
pub use defaults::{default_term, primitive_default, PrimitiveDefault};
pub use enums::widen_enum_default;
pub use models::{
    DeclaredType, LanguageParameter, LanguageParameters, ParameterLocation, RawParameterName,
    RawParameterType, Resolved, ResolvedType,
};
pub use optional::wrap_optionality;
pub use resolver::{resolve_each, resolve_parameter, resolve_parameters};
pub use types::{
    reconcile, resolve_declared, resolve_model_type, resolve_parameter_type, LanguageResolved,
    LanguageResolvedType,
};
