#![deny(missing_docs)]

//! # Backend Module
//!
//! Capability traits a target language implements, and the Rust implementation.

pub mod accessors;
pub mod rust;
pub mod traits;

pub use accessors::StandardAccessors;
pub use rust::{RustBackend, RustBackendConfig, RustLanguage};
pub use traits::{
    Capabilities, DocumentAccessors, LanguageTypes, NamingCapability, TermCapability,
    TypeCapability,
};
