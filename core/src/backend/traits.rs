#![deny(missing_docs)]

//! # Backend Capability Traits
//!
//! Defines the interface a target language must provide so the resolution pipeline
//! can build parameters without knowing which language it generates for.
//!
//! The four capability sets are independent traits so they can be substituted one
//! at a time (e.g. a backend that reuses the standard document accessors but
//! renders its own types). `Capabilities` bundles one of each and is passed
//! through the pipeline as context.

use crate::backend::accessors;
use crate::document::shims::{ShimParameter, ShimSchema};
use crate::error::{AppError, AppResult};
use crate::params::models::{DeclaredType, ParameterLocation, RawParameterType};
use crate::tracker::Tracker;
use serde_json::Value as JsonValue;
use std::fmt;

/// The syntax families a target language produces.
///
/// Implementors are usually uninhabited marker types (`enum RustLanguage {}`).
pub trait LanguageTypes: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// A type expression.
    type Type: Clone + fmt::Debug + PartialEq + Send + Sync;
    /// A value expression.
    type Term: Clone + fmt::Debug + PartialEq + Send + Sync;
    /// An identifier.
    type TermName: Clone + fmt::Debug + PartialEq + Send + Sync;
    /// A method parameter declaration (identifier, type and default).
    type MethodParameter: Clone + fmt::Debug + PartialEq + Send + Sync;
}

/// Identifier formatting and parameter symbol construction.
pub trait NamingCapability<L: LanguageTypes>: Send + Sync {
    /// Formats a wire name the way the language names method arguments (e.g. snake_case).
    fn format_method_arg_name(&self, raw: &str) -> String;

    /// Formats a catalog name the way the language names types.
    fn format_type_name(&self, raw: &str) -> String;

    /// Formats an enum raw value the way the language names enum members.
    fn format_enum_member_name(&self, raw: &str) -> String;

    /// Escapes a string into a valid identifier.
    fn pure_term_name(&self, name: &str) -> AppResult<L::TermName>;

    /// The textual form of an identifier.
    fn extract_term_name(&self, name: &L::TermName) -> String;

    /// Builds a method parameter symbol.
    fn method_parameter(
        &self,
        name: &L::TermName,
        tpe: &L::Type,
        default: Option<&L::Term>,
    ) -> L::MethodParameter;

    /// Returns the same parameter symbol under a new identifier.
    fn alter_method_parameter_name(
        &self,
        param: &L::MethodParameter,
        name: &L::TermName,
    ) -> L::MethodParameter;
}

/// Literal and value construction.
pub trait TermCapability<L: LanguageTypes>: Send + Sync {
    /// String literal.
    fn lit_string(&self, value: &str) -> L::Term;
    /// 32-bit float literal.
    fn lit_float(&self, value: f32) -> L::Term;
    /// 64-bit float literal.
    fn lit_double(&self, value: f64) -> L::Term;
    /// 32-bit integer literal.
    fn lit_int(&self, value: i32) -> L::Term;
    /// 64-bit integer literal.
    fn lit_long(&self, value: i64) -> L::Term;
    /// Boolean literal.
    fn lit_boolean(&self, value: bool) -> L::Term;
    /// Lifts a present value into the optional representation (`Some(x)`).
    fn lift_optional_term(&self, term: &L::Term) -> L::Term;
    /// The canonical absent value (`None`).
    fn empty_optional_term(&self) -> L::Term;
    /// Selects a member of an enumeration type.
    fn select_enum_member(&self, enum_type: &L::Type, member: &L::TermName) -> L::Term;
}

/// Type construction and comparison.
pub trait TypeCapability<L: LanguageTypes>: Send + Sync {
    /// Wraps a type in the optional representation.
    fn lift_optional_type(&self, tpe: &L::Type) -> L::Type;
    /// Sequence of `tpe`.
    fn lift_vector_type(&self, tpe: &L::Type) -> L::Type;
    /// String-keyed map of `tpe`.
    fn lift_map_type(&self, tpe: &L::Type) -> L::Type;
    /// The designated file-upload type.
    fn file_type(&self) -> L::Type;
    /// The type used for untyped JSON.
    fn json_type(&self) -> L::Type;
    /// A named model type; `name` is already formatted.
    fn model_type(&self, name: &str) -> L::Type;
    /// Maps a declared `(type, format)` to a concrete type.
    fn primitive_type(&self, raw: &RawParameterType) -> L::Type;
    /// Parses a custom type override.
    fn parse_type(&self, custom: &str) -> AppResult<L::Type>;

    /// Structural equality.
    fn types_equal(&self, a: &L::Type, b: &L::Type) -> bool {
        a == b
    }

    /// The unqualified name of a user-defined type; `None` for built-in and generic types.
    fn type_name(&self, tpe: &L::Type) -> Option<String>;

    /// Whether two types carry the same name (used to recognise catalog enums).
    fn type_names_equal(&self, a: &L::Type, b: &L::Type) -> bool {
        match (self.type_name(a), self.type_name(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

/// Raw field extraction from parameter nodes.
///
/// Every method has a default reading the shapes in `document::shims`; a
/// backend normally only declares its vendor prefixes.
pub trait DocumentAccessors: Send + Sync {
    /// Vendor extension prefixes, most specific first (e.g. `x-rust`).
    fn vendor_prefixes(&self) -> &[String];

    /// The wire name.
    fn parameter_name(&self, param: &Tracker<&ShimParameter>) -> AppResult<Tracker<String>> {
        param
            .down_field("name", |p| p.name.clone())
            .ok_or_else(|| AppError::MissingField {
                field: "name".to_string(),
                trail: param.show_history(),
            })
    }

    /// The declared location.
    fn parameter_location(
        &self,
        param: &Tracker<&ShimParameter>,
    ) -> Option<Tracker<ParameterLocation>> {
        param.down_field("in", |p| {
            p.parameter_in.as_deref().map(ParameterLocation::parse)
        })
    }

    /// Catalog name of a top-level `$ref`.
    fn parameter_ref(&self, param: &Tracker<&ShimParameter>) -> Option<Tracker<String>> {
        accessors::parameter_ref(param)
    }

    /// Catalog name of a `schema: { $ref }`.
    fn schema_ref(&self, param: &Tracker<&ShimParameter>) -> Option<Tracker<String>> {
        accessors::schema_ref(param)
    }

    /// The schema attached to a body parameter.
    fn body_schema<'a>(
        &self,
        param: &Tracker<&'a ShimParameter>,
    ) -> AppResult<Tracker<&'a ShimSchema>> {
        let node: &'a ShimParameter = *param.get();
        param
            .down_field("schema", |_| node.schema.as_ref())
            .ok_or_else(|| AppError::MissingField {
                field: "schema".to_string(),
                trail: param.show_history(),
            })
    }

    /// Header shape: legacy `type`/`format`/`items`, else `schema`.
    fn header_type(&self, param: &Tracker<&ShimParameter>) -> Tracker<DeclaredType> {
        accessors::legacy_or_schema(param, true)
    }

    /// Path shape: scalar only, legacy fields first.
    fn path_type(&self, param: &Tracker<&ShimParameter>) -> Tracker<DeclaredType> {
        accessors::legacy_or_schema(param, false)
    }

    /// Query shape: legacy fields first, arrays honoured.
    fn query_type(&self, param: &Tracker<&ShimParameter>) -> Tracker<DeclaredType> {
        accessors::legacy_or_schema(param, true)
    }

    /// Cookie shape: `schema` only.
    fn cookie_type(&self, param: &Tracker<&ShimParameter>) -> Tracker<DeclaredType> {
        accessors::schema_only(param)
    }

    /// Form shape: legacy fields (including `type: file`), else `schema`.
    fn form_type(&self, param: &Tracker<&ShimParameter>) -> Tracker<DeclaredType> {
        accessors::legacy_or_schema(param, true)
    }

    /// Custom type override on the parameter node.
    fn parameter_custom_type(&self, param: &Tracker<&ShimParameter>) -> Option<Tracker<String>> {
        accessors::vendor_string(
            self.vendor_prefixes(),
            &accessors::parameter_extra(param),
            "type",
        )
    }

    /// Custom type override on a schema.
    fn schema_custom_type(&self, schema: &Tracker<&ShimSchema>) -> Option<Tracker<String>> {
        accessors::vendor_string(
            self.vendor_prefixes(),
            &accessors::schema_extra(schema),
            "type",
        )
    }

    /// Declared default: on the node, else on its schema.
    fn declared_default(&self, param: &Tracker<&ShimParameter>) -> Option<Tracker<JsonValue>> {
        let node: &ShimParameter = *param.get();
        param
            .down_field("default", |_| node.default.clone())
            .or_else(|| {
                param
                    .down_field("schema", |_| node.schema.as_ref())
                    .and_then(|s| s.down_field("default", |s| s.default.clone()))
            })
    }

    /// Hash algorithm hint for file uploads.
    fn file_hash_algorithm(&self, param: &Tracker<&ShimParameter>) -> Option<Tracker<String>> {
        accessors::vendor_string(
            self.vendor_prefixes(),
            &accessors::parameter_extra(param),
            "file-hashing",
        )
    }

    /// Last resort for parameters no location predicate matched.
    fn fallback_parameter_type(
        &self,
        param: &Tracker<&ShimParameter>,
    ) -> AppResult<Tracker<DeclaredType>> {
        Err(AppError::UnclassifiableParameter {
            trail: param.show_history(),
            reason: match param.get().parameter_in.as_deref() {
                Some(other) => format!("unsupported location '{}'", other),
                None => "no location declared".to_string(),
            },
        })
    }
}

/// One instance of each capability set, shared by every pipeline stage.
pub struct Capabilities<'a, L: LanguageTypes> {
    /// Identifier formatting.
    pub naming: &'a dyn NamingCapability<L>,
    /// Literal construction.
    pub terms: &'a dyn TermCapability<L>,
    /// Type construction.
    pub types: &'a dyn TypeCapability<L>,
    /// Document field extraction.
    pub documents: &'a dyn DocumentAccessors,
}

impl<'a, L: LanguageTypes> Clone for Capabilities<'a, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, L: LanguageTypes> Copy for Capabilities<'a, L> {}

impl<'a, L: LanguageTypes> fmt::Debug for Capabilities<'a, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("vendor_prefixes", &self.documents.vendor_prefixes())
            .finish_non_exhaustive()
    }
}
