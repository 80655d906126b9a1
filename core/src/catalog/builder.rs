//! Builds a `ProtocolCatalog` from named document schemas.

use crate::backend::{Capabilities, LanguageTypes};
use crate::catalog::{
    AliasDefinition, EnumDefinition, ModelDefinition, ProtocolCatalog, ProtocolElem,
};
use crate::document::shims::{AdditionalProperties, ShimSchema};
use crate::error::AppResult;
use crate::params::defaults::primitive_default;
use crate::params::models::{RawParameterType, ResolvedType};
use crate::params::types::resolve_model_type;
use crate::tracker::Tracker;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Classifies each named schema as an enum, a model or an alias.
pub fn build_catalog<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    definitions: &IndexMap<String, ShimSchema>,
) -> AppResult<ProtocolCatalog<L>> {
    let root = Tracker::new(()).field("definitions", ());
    let mut elems = Vec::with_capacity(definitions.len());
    for (name, schema) in definitions {
        let tracked = root.field(name, schema);
        elems.push(build_elem(caps, name, &tracked)?);
    }
    log::debug!("Built protocol catalog with {} definitions", elems.len());
    Ok(ProtocolCatalog::new(elems))
}

fn build_elem<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    name: &str,
    schema: &Tracker<&ShimSchema>,
) -> AppResult<ProtocolElem<L>> {
    let node: &ShimSchema = schema.get();
    let named = || caps.types.model_type(&caps.naming.format_type_name(name));

    if let Some(values) = node.enum_values.as_ref().filter(|_| is_scalar(node)) {
        let raw_type = RawParameterType::new(
            node.type_name().or(Some("string")),
            node.format.as_deref(),
        );
        let listed = schema.field("enum", ());
        let members = values
            .iter()
            .enumerate()
            .filter_map(|(idx, value)| {
                enum_raw_value(&raw_type, &listed.index(idx, value.clone()))
            })
            .map(|raw| {
                let ident = caps
                    .naming
                    .pure_term_name(&caps.naming.format_enum_member_name(&raw))?;
                Ok((raw, ident))
            })
            .collect::<AppResult<Vec<_>>>()?;
        return Ok(ProtocolElem::Enum(EnumDefinition {
            name: name.to_string(),
            tpe: named(),
            raw_type,
            members,
        }));
    }

    if node.is_object() && !is_map(node) {
        return Ok(ProtocolElem::Model(ModelDefinition {
            name: name.to_string(),
            tpe: named(),
            raw_type: RawParameterType::of("object"),
        }));
    }

    let tpe = match resolve_model_type(caps, schema, None, None)? {
        ResolvedType::Resolved(resolved) => resolved.tpe,
        ResolvedType::Deferred(target) => caps
            .types
            .model_type(&caps.naming.format_type_name(&target)),
        ResolvedType::DeferredArray(target) => caps.types.lift_vector_type(
            &caps
                .types
                .model_type(&caps.naming.format_type_name(&target)),
        ),
        ResolvedType::DeferredMap(target) => caps.types.lift_map_type(
            &caps
                .types
                .model_type(&caps.naming.format_type_name(&target)),
        ),
    };
    Ok(ProtocolElem::Alias(AliasDefinition {
        name: name.to_string(),
        tpe,
        raw_type: RawParameterType::new(node.type_name(), node.format.as_deref()),
    }))
}

/// `additionalProperties: { .. }` without declared properties.
fn is_map(schema: &ShimSchema) -> bool {
    matches!(
        schema.additional_properties,
        Some(AdditionalProperties::Schema(_))
    ) && schema.properties.is_empty()
}

fn is_scalar(schema: &ShimSchema) -> bool {
    !matches!(schema.type_name(), Some("object") | Some("array")) && schema.properties.is_empty()
}

/// Member values are keyed exactly as a parsed default renders, so `1.0` in a
/// `number/double` enum matches a default of `1.0`.
fn enum_raw_value(raw_type: &RawParameterType, value: &Tracker<JsonValue>) -> Option<String> {
    if let Some(literal) = primitive_default(raw_type, value) {
        return Some(literal.raw_value());
    }
    match value.get() {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::rust::{RustBackend, RustLanguage};
    use crate::document::shims::ShimDocument;
    use pretty_assertions::assert_eq;

    const DEFINITIONS: &str = r##"
openapi: 3.0.3
info: { title: t, version: "1" }
paths: {}
components:
  schemas:
    pet_status:
      type: string
      enum: [available, in-stock, sold]
    Pet:
      type: object
      properties:
        id: { type: integer, format: int64 }
    Tags:
      type: array
      items: { type: string }
    Pets:
      type: array
      items: { $ref: "#/components/schemas/Pet" }
    PetIndex:
      type: object
      additionalProperties: { $ref: "#/components/schemas/Pet" }
    Id:
      type: integer
      format: int64
    Ratio:
      type: number
      format: double
      enum: [1.0, 2.5]
"##;

    fn catalog() -> ProtocolCatalog<RustLanguage> {
        let doc = ShimDocument::parse(DEFINITIONS).unwrap();
        let backend = RustBackend::default();
        build_catalog(backend.capabilities(), &doc.schema_definitions()).unwrap()
    }

    fn rendered(catalog: &ProtocolCatalog<RustLanguage>, name: &str) -> String {
        catalog.find(name).unwrap().tpe().to_string()
    }

    #[test]
    fn test_entry_kinds() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 7);
        let kinds: Vec<&str> = catalog
            .iter()
            .map(|elem| match elem {
                ProtocolElem::Model(_) => "model",
                ProtocolElem::Enum(_) => "enum",
                ProtocolElem::Alias(_) => "alias",
            })
            .collect();
        assert_eq!(kinds, vec!["enum", "model", "alias", "alias", "alias", "alias", "enum"]);
    }

    #[test]
    fn test_enum_members() {
        let catalog = catalog();
        let Some(ProtocolElem::Enum(status)) = catalog.find("pet_status") else {
            panic!("pet_status should be an enum");
        };
        assert_eq!(status.tpe.to_string(), "PetStatus");
        let members: Vec<(&str, &str)> = status
            .members
            .iter()
            .map(|(raw, ident)| (raw.as_str(), ident.as_str()))
            .collect();
        assert_eq!(
            members,
            vec![("available", "Available"), ("in-stock", "InStock"), ("sold", "Sold")]
        );
    }

    #[test]
    fn test_double_enum_keys_match_parsed_defaults() {
        let catalog = catalog();
        let Some(ProtocolElem::Enum(ratio)) = catalog.find("Ratio") else {
            panic!("Ratio should be an enum");
        };
        let raw: Vec<&str> = ratio.members.iter().map(|(raw, _)| raw.as_str()).collect();
        assert_eq!(raw, vec!["1", "2.5"]);
        assert_eq!(ratio.member(&1.0f64.to_string()).map(|i| i.as_str()), Some("_1"));
        assert_eq!(ratio.member(&2.5f64.to_string()).map(|i| i.as_str()), Some("_25"));
    }

    #[test]
    fn test_alias_types() {
        let catalog = catalog();
        assert_eq!(rendered(&catalog, "Tags"), "Vec<String>");
        assert_eq!(rendered(&catalog, "Pets"), "Vec<Pet>");
        assert_eq!(
            rendered(&catalog, "PetIndex"),
            "std::collections::HashMap<String, Pet>"
        );
        assert_eq!(rendered(&catalog, "Id"), "i64");
    }
}
