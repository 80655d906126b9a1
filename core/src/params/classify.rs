//! Assigns each parameter node exactly one wire category.

use crate::backend::DocumentAccessors;
use crate::document::shims::ShimParameter;
use crate::params::models::ParameterLocation;
use crate::tracker::Tracker;
use std::fmt;

/// Wire category of a parameter node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterCategory {
    /// Top-level `$ref` to a reusable parameter or definition.
    Reference(String),
    /// `schema: { $ref }`.
    SchemaReference(String),
    /// `in: body`
    Body,
    /// `in: header`
    Header,
    /// `in: path`
    Path,
    /// `in: query`
    Query,
    /// `in: cookie`
    Cookie,
    /// `in: formData`
    FormData,
    /// Nothing above matched; the backend fallback decides.
    Fallback,
}

impl fmt::Display for ParameterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterCategory::Reference(name) => write!(f, "reference to {}", name),
            ParameterCategory::SchemaReference(name) => write!(f, "schema reference to {}", name),
            ParameterCategory::Body => f.write_str("body"),
            ParameterCategory::Header => f.write_str("header"),
            ParameterCategory::Path => f.write_str("path"),
            ParameterCategory::Query => f.write_str("query"),
            ParameterCategory::Cookie => f.write_str("cookie"),
            ParameterCategory::FormData => f.write_str("formData"),
            ParameterCategory::Fallback => f.write_str("fallback"),
        }
    }
}

type Rule = fn(&dyn DocumentAccessors, &Tracker<&ShimParameter>) -> Option<ParameterCategory>;

fn located(
    documents: &dyn DocumentAccessors,
    param: &Tracker<&ShimParameter>,
    location: ParameterLocation,
    category: ParameterCategory,
) -> Option<ParameterCategory> {
    documents
        .parameter_location(param)
        .filter(|found| *found.get() == location)
        .map(|_| category)
}

fn top_level_reference(
    documents: &dyn DocumentAccessors,
    param: &Tracker<&ShimParameter>,
) -> Option<ParameterCategory> {
    documents
        .parameter_ref(param)
        .map(|name| ParameterCategory::Reference(name.into_inner()))
}

fn schema_reference(
    documents: &dyn DocumentAccessors,
    param: &Tracker<&ShimParameter>,
) -> Option<ParameterCategory> {
    documents
        .schema_ref(param)
        .map(|name| ParameterCategory::SchemaReference(name.into_inner()))
}

fn in_body(d: &dyn DocumentAccessors, p: &Tracker<&ShimParameter>) -> Option<ParameterCategory> {
    located(d, p, ParameterLocation::Body, ParameterCategory::Body)
}

fn in_header(d: &dyn DocumentAccessors, p: &Tracker<&ShimParameter>) -> Option<ParameterCategory> {
    located(d, p, ParameterLocation::Header, ParameterCategory::Header)
}

fn in_path(d: &dyn DocumentAccessors, p: &Tracker<&ShimParameter>) -> Option<ParameterCategory> {
    located(d, p, ParameterLocation::Path, ParameterCategory::Path)
}

fn in_query(d: &dyn DocumentAccessors, p: &Tracker<&ShimParameter>) -> Option<ParameterCategory> {
    located(d, p, ParameterLocation::Query, ParameterCategory::Query)
}

fn in_cookie(d: &dyn DocumentAccessors, p: &Tracker<&ShimParameter>) -> Option<ParameterCategory> {
    located(d, p, ParameterLocation::Cookie, ParameterCategory::Cookie)
}

fn in_form(d: &dyn DocumentAccessors, p: &Tracker<&ShimParameter>) -> Option<ParameterCategory> {
    located(d, p, ParameterLocation::FormData, ParameterCategory::FormData)
}

/// Ordered rules; the first match wins.
const RULES: &[Rule] = &[
    top_level_reference,
    schema_reference,
    in_body,
    in_header,
    in_path,
    in_query,
    in_cookie,
    in_form,
];

/// Classifies a parameter node.
pub fn classify(
    documents: &dyn DocumentAccessors,
    param: &Tracker<&ShimParameter>,
) -> ParameterCategory {
    let category = RULES
        .iter()
        .find_map(|rule| rule(documents, param))
        .unwrap_or(ParameterCategory::Fallback);
    log::trace!("Classified {} as {}", param.show_history(), category);
    category
}
