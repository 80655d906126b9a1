//! # Standard Document Accessors
//!
//! Field extraction shared by every backend, plus `StandardAccessors`, the
//! accessor set that only varies by vendor prefix.

use crate::backend::traits::DocumentAccessors;
use crate::document::refs::extract_ref_name;
use crate::document::shims::{Extra, ShimParameter, ShimSchema};
use crate::params::models::{DeclaredType, RawParameterType};
use crate::tracker::Tracker;

/// Document accessors parameterised only by vendor prefixes.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardAccessors {
    vendor_prefixes: Vec<String>,
}

impl StandardAccessors {
    /// Accessors reading `<prefix>-type` / `<prefix>-file-hashing` for each prefix in order.
    pub fn new(vendor_prefixes: Vec<String>) -> Self {
        Self { vendor_prefixes }
    }
}

impl DocumentAccessors for StandardAccessors {
    fn vendor_prefixes(&self) -> &[String] {
        &self.vendor_prefixes
    }
}

pub(crate) fn parameter_ref(param: &Tracker<&ShimParameter>) -> Option<Tracker<String>> {
    param.down_field("$ref", |p| p.reference.as_deref().map(extract_ref_name))
}

pub(crate) fn schema_ref(param: &Tracker<&ShimParameter>) -> Option<Tracker<String>> {
    let node: &ShimParameter = param.get();
    param
        .down_field("schema", |_| node.schema.as_ref())
        .and_then(|schema| {
            schema.down_field("$ref", |s| s.reference.as_deref().map(extract_ref_name))
        })
}

pub(crate) fn parameter_extra<'a>(param: &Tracker<&'a ShimParameter>) -> Tracker<&'a Extra> {
    let node: &'a ShimParameter = *param.get();
    Tracker::with_history(&node.extra, param.history().to_vec())
}

pub(crate) fn schema_extra<'a>(schema: &Tracker<&'a ShimSchema>) -> Tracker<&'a Extra> {
    let node: &'a ShimSchema = *schema.get();
    Tracker::with_history(&node.extra, schema.history().to_vec())
}

/// First `<prefix>-<suffix>` string extension, trying prefixes in order.
pub(crate) fn vendor_string(
    prefixes: &[String],
    extra: &Tracker<&Extra>,
    suffix: &str,
) -> Option<Tracker<String>> {
    prefixes.iter().find_map(|prefix| {
        let key = format!("{}-{}", prefix, suffix);
        extra.down_field(&key, |map| {
            map.get(&key).and_then(|v| v.as_str()).map(str::to_string)
        })
    })
}

/// Legacy Swagger 2.0 fields when `type` is present on the node, else the `schema`.
pub(crate) fn legacy_or_schema(
    param: &Tracker<&ShimParameter>,
    allow_items: bool,
) -> Tracker<DeclaredType> {
    let node: &ShimParameter = param.get();
    if node.schema_type.is_some() {
        let raw = RawParameterType::new(node.schema_type.as_deref(), node.format.as_deref());
        let items = if allow_items {
            node.items.as_deref().map(|items| Box::new(declared_from_schema(items)))
        } else {
            None
        };
        return param.field(
            "type",
            DeclaredType {
                raw,
                items,
                reference: None,
            },
        );
    }
    let mut declared = schema_only(param);
    if !allow_items {
        declared = declared.map(|d| DeclaredType::scalar(d.raw));
    }
    declared
}

/// Reads the declaration from `schema`; absent schema yields an empty declaration.
pub(crate) fn schema_only(param: &Tracker<&ShimParameter>) -> Tracker<DeclaredType> {
    let node: &ShimParameter = param.get();
    match node.schema.as_ref() {
        Some(schema) => param.field("schema", declared_from_schema(schema)),
        None => param.field("schema", DeclaredType::default()),
    }
}

pub(crate) fn declared_from_schema(schema: &ShimSchema) -> DeclaredType {
    DeclaredType {
        raw: RawParameterType::new(schema.type_name(), schema.format.as_deref()),
        items: schema
            .items
            .as_deref()
            .map(|items| Box::new(declared_from_schema(items))),
        reference: schema.reference.as_deref().map(extract_ref_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tracked(param: &ShimParameter) -> Tracker<&ShimParameter> {
        Tracker::new(param).field("parameters", ()).index(0, param)
    }

    #[test]
    fn test_legacy_fields_win_over_schema() {
        let mut param = ShimParameter::new("limit", "query");
        param.schema_type = Some("integer".into());
        param.format = Some("int64".into());
        param.schema = Some(ShimSchema::primitive("string", None));
        let declared = legacy_or_schema(&tracked(&param), true);
        assert_eq!(
            declared.get().raw,
            RawParameterType::new(Some("integer"), Some("int64"))
        );
        assert_eq!(declared.show_history(), ".parameters[0].type");
    }

    #[test]
    fn test_schema_items_reference() {
        let mut param = ShimParameter::new("colors", "query");
        let mut schema = ShimSchema::primitive("array", None);
        schema.items = Some(Box::new(ShimSchema::reference("#/definitions/Color")));
        param.schema = Some(schema);
        let declared = legacy_or_schema(&tracked(&param), true).into_inner();
        assert_eq!(declared.raw, RawParameterType::of("array"));
        assert_eq!(
            declared.items.and_then(|i| i.reference),
            Some("Color".to_string())
        );
    }

    #[test]
    fn test_scalar_shape_drops_items() {
        let mut param = ShimParameter::new("id", "path");
        param.schema_type = Some("array".into());
        param.items = Some(Box::new(ShimSchema::primitive("string", None)));
        let declared = legacy_or_schema(&tracked(&param), false).into_inner();
        assert!(declared.items.is_none());
    }

    #[test]
    fn test_vendor_string_prefix_order() {
        let mut param = ShimParameter::new("id", "query");
        param.extra.insert("x-oasparam-type".into(), json!("u64"));
        param.extra.insert("x-rust-type".into(), json!("u128"));
        let prefixes = vec!["x-rust".to_string(), "x-oasparam".to_string()];
        let t = tracked(&param);
        let found = vendor_string(&prefixes, &parameter_extra(&t), "type").unwrap();
        assert_eq!(found.get(), "u128");
        assert_eq!(found.show_history(), ".parameters[0].x-rust-type");
    }

    #[test]
    fn test_schema_ref_name() {
        let mut param = ShimParameter::new("color", "query");
        param.schema = Some(ShimSchema::reference("#/definitions/Color"));
        let t = tracked(&param);
        let name = schema_ref(&t).unwrap();
        assert_eq!(name.get(), "Color");
        assert_eq!(name.show_history(), ".parameters[0].schema.$ref");
    }
}
