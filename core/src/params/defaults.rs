//! Primitive default literals derived from a declared `(type, format, default)`.

use crate::backend::{LanguageTypes, TermCapability};
use crate::params::models::RawParameterType;
use crate::tracker::Tracker;
use serde_json::Value as JsonValue;

/// A literal of one of the kinds a declared default may take.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveDefault {
    /// `string`
    Str(String),
    /// `number/float`
    Float(f32),
    /// `number/double`
    Double(f64),
    /// `integer/int32`
    Int(i32),
    /// `integer/int64`
    Long(i64),
    /// `boolean`
    Bool(bool),
}

impl PrimitiveDefault {
    /// The value as it would appear in an `enum` list.
    pub fn raw_value(&self) -> String {
        match self {
            PrimitiveDefault::Str(s) => s.clone(),
            PrimitiveDefault::Float(v) => v.to_string(),
            PrimitiveDefault::Double(v) => v.to_string(),
            PrimitiveDefault::Int(v) => v.to_string(),
            PrimitiveDefault::Long(v) => v.to_string(),
            PrimitiveDefault::Bool(v) => v.to_string(),
        }
    }

    /// Builds the backend literal.
    pub fn to_term<L: LanguageTypes>(&self, terms: &dyn TermCapability<L>) -> L::Term {
        match self {
            PrimitiveDefault::Str(s) => terms.lit_string(s),
            PrimitiveDefault::Float(v) => terms.lit_float(*v),
            PrimitiveDefault::Double(v) => terms.lit_double(*v),
            PrimitiveDefault::Int(v) => terms.lit_int(*v),
            PrimitiveDefault::Long(v) => terms.lit_long(*v),
            PrimitiveDefault::Bool(v) => terms.lit_boolean(*v),
        }
    }
}

/// Literal kind implied by a declaration; `None` means the declaration never carries a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralKind {
    Str,
    Float,
    Double,
    Int,
    Long,
    Bool,
}

fn literal_kind(raw: &RawParameterType) -> Option<LiteralKind> {
    match (raw.type_name.as_deref(), raw.format.as_deref()) {
        (Some("string"), None) => Some(LiteralKind::Str),
        (Some("number"), Some("float")) => Some(LiteralKind::Float),
        (Some("number"), Some("double")) => Some(LiteralKind::Double),
        (Some("integer"), Some("int32")) => Some(LiteralKind::Int),
        (Some("integer"), Some("int64")) => Some(LiteralKind::Long),
        (Some("boolean"), None) => Some(LiteralKind::Bool),
        _ => None,
    }
}

fn parse_literal(kind: LiteralKind, value: &JsonValue) -> Option<PrimitiveDefault> {
    match kind {
        LiteralKind::Str => value.as_str().map(|s| PrimitiveDefault::Str(s.to_string())),
        LiteralKind::Float => number(value).map(|v| PrimitiveDefault::Float(v as f32)),
        LiteralKind::Double => number(value).map(PrimitiveDefault::Double),
        LiteralKind::Int => integer(value)
            .and_then(|v| i32::try_from(v).ok())
            .map(PrimitiveDefault::Int),
        LiteralKind::Long => integer(value).map(PrimitiveDefault::Long),
        LiteralKind::Bool => match value {
            JsonValue::Bool(b) => Some(PrimitiveDefault::Bool(*b)),
            JsonValue::String(s) => s.parse().ok().map(PrimitiveDefault::Bool),
            _ => None,
        },
    }
}

fn number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses `value` as the literal kind `raw` implies.
///
/// Returns `None` both when the declaration has no literal kind and when the value
/// does not parse; the latter is logged and otherwise ignored.
pub fn primitive_default(
    raw: &RawParameterType,
    value: &Tracker<JsonValue>,
) -> Option<PrimitiveDefault> {
    let kind = literal_kind(raw)?;
    let parsed = parse_literal(kind, value.get());
    if parsed.is_none() {
        log::debug!(
            "Dropping malformed default {} for type {} at {}",
            value.get(),
            raw,
            value.show_history()
        );
    }
    parsed
}

/// The backend default term for a declared default, if any.
pub fn default_term<L: LanguageTypes>(
    terms: &dyn TermCapability<L>,
    raw: &RawParameterType,
    value: Option<&Tracker<JsonValue>>,
) -> Option<L::Term> {
    value
        .and_then(|v| primitive_default(raw, v))
        .map(|d| d.to_term(terms))
}
