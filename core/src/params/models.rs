#![deny(missing_docs)]

//! # Parameter Models
//!
//! Intermediate and final representations produced by the resolution pipeline.

use crate::backend::LanguageTypes;
use std::fmt;

/// Wire location of a parameter (`in`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    /// Swagger 2.0 request body.
    Body,
    /// HTTP header.
    Header,
    /// Path template segment.
    Path,
    /// Query string entry.
    Query,
    /// Cookie.
    Cookie,
    /// Form field (urlencoded or multipart).
    FormData,
    /// Any location this resolver does not know.
    Other(String),
}

impl ParameterLocation {
    /// Parses the raw `in` value.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "body" => ParameterLocation::Body,
            "header" => ParameterLocation::Header,
            "path" => ParameterLocation::Path,
            "query" => ParameterLocation::Query,
            "cookie" => ParameterLocation::Cookie,
            "formData" => ParameterLocation::FormData,
            other => ParameterLocation::Other(other.to_string()),
        }
    }

    /// The raw `in` value.
    pub fn as_str(&self) -> &str {
        match self {
            ParameterLocation::Body => "body",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The original wire-level name of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawParameterName(String);

impl RawParameterName {
    /// Wraps a raw name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared `(type, format)` pair, kept after resolution for diagnostics and defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawParameterType {
    /// Declared type name (e.g. `integer`).
    pub type_name: Option<String>,
    /// Declared format (e.g. `int64`).
    pub format: Option<String>,
}

impl RawParameterType {
    /// Builds a raw type from optional parts.
    pub fn new(type_name: Option<&str>, format: Option<&str>) -> Self {
        Self {
            type_name: type_name.map(str::to_string),
            format: format.map(str::to_string),
        }
    }

    /// `(type, none)`.
    pub fn of(type_name: &str) -> Self {
        Self::new(Some(type_name), None)
    }
}

impl fmt::Display for RawParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.type_name, &self.format) {
            (Some(t), Some(fmt_name)) => write!(f, "{}/{}", t, fmt_name),
            (Some(t), None) => f.write_str(t),
            (None, Some(fmt_name)) => write!(f, "?/{}", fmt_name),
            (None, None) => f.write_str("?"),
        }
    }
}

/// The shape a location accessor extracts from a non-body parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclaredType {
    /// Declared `(type, format)`.
    pub raw: RawParameterType,
    /// Element shape when `raw` is an array.
    pub items: Option<Box<DeclaredType>>,
    /// `$ref` target when this shape is a reference (array items only).
    pub reference: Option<String>,
}

impl DeclaredType {
    /// A scalar declaration.
    pub fn scalar(raw: RawParameterType) -> Self {
        Self {
            raw,
            items: None,
            reference: None,
        }
    }
}

/// A type with its computed default and the raw declaration it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T, E> {
    /// Concrete backend type.
    pub tpe: T,
    /// Default term computed from the declared default, if any.
    pub default: Option<E>,
    /// Declared `(type, format)`.
    pub raw_type: RawParameterType,
}

/// Result of the first resolution phase.
///
/// The deferred variants name protocol catalog entries and must be discharged
/// by `params::types::reconcile` before a parameter record is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedType<T, E> {
    /// Fully known type.
    Resolved(Resolved<T, E>),
    /// A named catalog entry.
    Deferred(String),
    /// A vector of a named catalog entry.
    DeferredArray(String),
    /// A string-keyed map of a named catalog entry.
    DeferredMap(String),
}

impl<T, E> ResolvedType<T, E> {
    /// True for the placeholder variants.
    pub fn is_deferred(&self) -> bool {
        !matches!(self, ResolvedType::Resolved(_))
    }
}

/// The final, immutable parameter record.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageParameter<L: LanguageTypes> {
    pub(crate) location: Option<ParameterLocation>,
    pub(crate) param: L::MethodParameter,
    pub(crate) param_name: L::TermName,
    pub(crate) arg_name: RawParameterName,
    pub(crate) arg_type: L::Type,
    pub(crate) default_value: Option<L::Term>,
    pub(crate) raw_type: RawParameterType,
    pub(crate) required: bool,
    pub(crate) hash_algorithm: Option<String>,
    pub(crate) is_file: bool,
}

impl<L: LanguageTypes> LanguageParameter<L> {
    /// Wire location, if the node declared a known or unknown `in`.
    pub fn location(&self) -> Option<&ParameterLocation> {
        self.location.as_ref()
    }

    /// The backend parameter symbol.
    pub fn param(&self) -> &L::MethodParameter {
        &self.param
    }

    /// The identifier term.
    pub fn param_name(&self) -> &L::TermName {
        &self.param_name
    }

    /// The original wire name.
    pub fn arg_name(&self) -> &RawParameterName {
        &self.arg_name
    }

    /// The final type, optional-wrapped when not required.
    pub fn arg_type(&self) -> &L::Type {
        &self.arg_type
    }

    /// The final default term.
    pub fn default_value(&self) -> Option<&L::Term> {
        self.default_value.as_ref()
    }

    /// Declared `(type, format)`.
    pub fn raw_type(&self) -> &RawParameterType {
        &self.raw_type
    }

    /// Whether the parameter is required.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Hash algorithm hint for file uploads.
    pub fn hash_algorithm(&self) -> Option<&str> {
        self.hash_algorithm.as_deref()
    }

    /// Whether the type is the backend's file-upload type.
    pub fn is_file(&self) -> bool {
        self.is_file
    }

    /// A copy carrying a new identifier and parameter symbol.
    pub fn with_identifier(&self, param: L::MethodParameter, param_name: L::TermName) -> Self {
        Self {
            location: self.location.clone(),
            param,
            param_name,
            arg_name: self.arg_name.clone(),
            arg_type: self.arg_type.clone(),
            default_value: self.default_value.clone(),
            raw_type: self.raw_type.clone(),
            required: self.required,
            hash_algorithm: self.hash_algorithm.clone(),
            is_file: self.is_file,
        }
    }

    fn is_at(&self, location: &ParameterLocation) -> bool {
        self.location.as_ref() == Some(location)
    }
}

/// A resolved parameter list grouped by location.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageParameters<L: LanguageTypes> {
    /// Every parameter, in declaration order.
    pub parameters: Vec<LanguageParameter<L>>,
    /// The first `body` parameter; later ones are ignored.
    pub body_param: Option<LanguageParameter<L>>,
    /// Header parameters.
    pub header_params: Vec<LanguageParameter<L>>,
    /// Path parameters.
    pub path_params: Vec<LanguageParameter<L>>,
    /// Query parameters.
    pub query_params: Vec<LanguageParameter<L>>,
    /// Cookie parameters.
    pub cookie_params: Vec<LanguageParameter<L>>,
    /// Form parameters.
    pub form_params: Vec<LanguageParameter<L>>,
}

impl<L: LanguageTypes> LanguageParameters<L> {
    /// Groups a resolved list.
    pub fn new(parameters: Vec<LanguageParameter<L>>) -> Self {
        let bucket = |location: ParameterLocation| -> Vec<LanguageParameter<L>> {
            parameters
                .iter()
                .filter(|p| p.is_at(&location))
                .cloned()
                .collect()
        };

        let mut bodies = bucket(ParameterLocation::Body).into_iter();
        let body_param = bodies.next();
        for dropped in bodies {
            log::debug!(
                "Ignoring additional body parameter '{}'; only the first is used",
                dropped.arg_name
            );
        }

        Self {
            header_params: bucket(ParameterLocation::Header),
            path_params: bucket(ParameterLocation::Path),
            query_params: bucket(ParameterLocation::Query),
            cookie_params: bucket(ParameterLocation::Cookie),
            form_params: bucket(ParameterLocation::FormData),
            body_param,
            parameters,
        }
    }

    /// True when no parameter was declared.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
