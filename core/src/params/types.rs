//! # Type Resolver
//!
//! Phase one maps a classified parameter to a concrete type or to a named
//! placeholder. Phase two (`reconcile`) discharges placeholders against the
//! protocol catalog.

use crate::backend::{Capabilities, LanguageTypes};
use crate::catalog::ProtocolCatalog;
use crate::document::refs::extract_ref_name;
use crate::document::shims::{AdditionalProperties, ShimParameter, ShimSchema};
use crate::error::{AppError, AppResult};
use crate::params::classify::ParameterCategory;
use crate::params::defaults::default_term;
use crate::params::models::{DeclaredType, RawParameterType, Resolved, ResolvedType};
use crate::tracker::Tracker;
use serde_json::Value as JsonValue;

/// Phase-one result specialised to a backend.
pub type LanguageResolvedType<L> =
    ResolvedType<<L as LanguageTypes>::Type, <L as LanguageTypes>::Term>;

/// Phase-two result specialised to a backend.
pub type LanguageResolved<L> = Resolved<<L as LanguageTypes>::Type, <L as LanguageTypes>::Term>;

/// Resolves the type of a classified parameter.
pub fn resolve_parameter_type<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    param: &Tracker<&ShimParameter>,
    category: &ParameterCategory,
) -> AppResult<LanguageResolvedType<L>> {
    let documents = caps.documents;
    let declared_default = documents.declared_default(param);

    let declared = match category {
        ParameterCategory::Reference(name) | ParameterCategory::SchemaReference(name) => {
            return Ok(ResolvedType::Deferred(name.clone()));
        }
        ParameterCategory::Body => {
            let schema = documents.body_schema(param)?;
            return resolve_model_type(
                caps,
                &schema,
                documents.parameter_custom_type(param),
                declared_default.as_ref(),
            );
        }
        ParameterCategory::Header => documents.header_type(param),
        ParameterCategory::Path => documents.path_type(param),
        ParameterCategory::Query => documents.query_type(param),
        ParameterCategory::Cookie => documents.cookie_type(param),
        ParameterCategory::FormData => documents.form_type(param),
        ParameterCategory::Fallback => documents.fallback_parameter_type(param)?,
    };

    let node: &ShimParameter = param.get();
    let schema_custom = param
        .down_field("schema", |_| node.schema.as_ref())
        .and_then(|schema| documents.schema_custom_type(&schema));
    let custom = schema_custom.or_else(|| documents.parameter_custom_type(param));

    resolve_declared(caps, &declared, custom, declared_default.as_ref())
}

/// Resolves a location-specific declaration.
pub fn resolve_declared<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    declared: &Tracker<DeclaredType>,
    custom: Option<Tracker<String>>,
    default: Option<&Tracker<JsonValue>>,
) -> AppResult<LanguageResolvedType<L>> {
    let raw = declared.get().raw.clone();
    if let Some(custom) = custom {
        return custom_resolved(caps, &custom, raw, default);
    }
    Ok(declared_shape(caps, declared.get(), default))
}

fn declared_shape<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    declared: &DeclaredType,
    default: Option<&Tracker<JsonValue>>,
) -> LanguageResolvedType<L> {
    if let Some(name) = &declared.reference {
        return ResolvedType::Deferred(name.clone());
    }
    let raw = declared.raw.clone();
    if raw.type_name.as_deref() == Some("array") {
        let element = match declared.items.as_deref() {
            Some(DeclaredType {
                reference: Some(name),
                ..
            }) => return ResolvedType::DeferredArray(name.clone()),
            Some(items) => element_type(caps, declared_shape(caps, items, None)),
            None => caps.types.json_type(),
        };
        return ResolvedType::Resolved(Resolved {
            tpe: caps.types.lift_vector_type(&element),
            default: None,
            raw_type: raw,
        });
    }
    primitive(caps, raw, default)
}

/// Resolves a schema the way standalone definitions are resolved.
///
/// `fallback_custom` is the override declared on the enclosing node; an override on
/// the schema itself wins over it.
pub fn resolve_model_type<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    schema: &Tracker<&ShimSchema>,
    fallback_custom: Option<Tracker<String>>,
    default: Option<&Tracker<JsonValue>>,
) -> AppResult<LanguageResolvedType<L>> {
    let node: &ShimSchema = schema.get();
    let raw = RawParameterType::new(node.type_name(), node.format.as_deref());

    if let Some(custom) = caps
        .documents
        .schema_custom_type(schema)
        .or(fallback_custom)
    {
        return custom_resolved(caps, &custom, raw, default);
    }

    if let Some(reference) = &node.reference {
        return Ok(ResolvedType::Deferred(extract_ref_name(reference)));
    }

    if node.type_name() == Some("array") {
        let element = match node.items.as_deref() {
            Some(ShimSchema {
                reference: Some(reference),
                ..
            }) => return Ok(ResolvedType::DeferredArray(extract_ref_name(reference))),
            Some(items) => {
                let items = schema.field("items", items);
                element_type(caps, resolve_model_type(caps, &items, None, None)?)
            }
            None => caps.types.json_type(),
        };
        return Ok(ResolvedType::Resolved(Resolved {
            tpe: caps.types.lift_vector_type(&element),
            default: None,
            raw_type: raw,
        }));
    }

    if node.is_object() {
        let tpe = match &node.additional_properties {
            Some(AdditionalProperties::Schema(values)) if node.properties.is_empty() => {
                if let Some(reference) = &values.reference {
                    return Ok(ResolvedType::DeferredMap(extract_ref_name(reference)));
                }
                let values = schema.field("additionalProperties", values.as_ref());
                let element = element_type(caps, resolve_model_type(caps, &values, None, None)?);
                caps.types.lift_map_type(&element)
            }
            _ => caps.types.json_type(),
        };
        return Ok(ResolvedType::Resolved(Resolved {
            tpe,
            default: None,
            raw_type: raw,
        }));
    }

    Ok(primitive(caps, raw, default))
}

#[derive(Debug, Clone, Copy)]
enum Container {
    Scalar,
    Vector,
    Map,
}

/// Discharges a placeholder against the catalog.
pub fn reconcile<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    catalog: &ProtocolCatalog<L>,
    resolved: LanguageResolvedType<L>,
    param: &Tracker<&ShimParameter>,
) -> AppResult<LanguageResolved<L>> {
    let (name, container) = match resolved {
        ResolvedType::Resolved(resolved) => return Ok(resolved),
        ResolvedType::Deferred(name) => (name, Container::Scalar),
        ResolvedType::DeferredArray(name) => (name, Container::Vector),
        ResolvedType::DeferredMap(name) => (name, Container::Map),
    };

    let elem = catalog
        .find(&name)
        .ok_or_else(|| AppError::UnresolvableReference {
            name: name.clone(),
            trail: param.show_history(),
        })?;

    let (tpe, raw_type) = match container {
        Container::Scalar => (elem.tpe().clone(), elem.raw_type().clone()),
        Container::Vector => (
            caps.types.lift_vector_type(elem.tpe()),
            RawParameterType::of("array"),
        ),
        Container::Map => (
            caps.types.lift_map_type(elem.tpe()),
            RawParameterType::of("object"),
        ),
    };
    let declared_default = caps.documents.declared_default(param);
    let default = default_term(caps.terms, &raw_type, declared_default.as_ref());
    Ok(Resolved {
        tpe,
        default,
        raw_type,
    })
}

fn custom_resolved<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    custom: &Tracker<String>,
    raw: RawParameterType,
    default: Option<&Tracker<JsonValue>>,
) -> AppResult<LanguageResolvedType<L>> {
    let tpe = caps.types.parse_type(custom.get()).map_err(|_| {
        AppError::InvalidType(format!("{} at {}", custom.get(), custom.show_history()))
    })?;
    Ok(ResolvedType::Resolved(Resolved {
        tpe,
        default: default_term(caps.terms, &raw, default),
        raw_type: raw,
    }))
}

fn primitive<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    raw: RawParameterType,
    default: Option<&Tracker<JsonValue>>,
) -> LanguageResolvedType<L> {
    ResolvedType::Resolved(Resolved {
        tpe: caps.types.primitive_type(&raw),
        default: default_term(caps.terms, &raw, default),
        raw_type: raw,
    })
}

/// Element type of a container; references nested deeper than one level degrade to JSON.
fn element_type<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    resolved: LanguageResolvedType<L>,
) -> L::Type {
    match resolved {
        ResolvedType::Resolved(inner) => inner.tpe,
        ResolvedType::Deferred(name)
        | ResolvedType::DeferredArray(name)
        | ResolvedType::DeferredMap(name) => {
            log::debug!("Nested reference to '{}' resolved as untyped JSON", name);
            caps.types.json_type()
        }
    }
}
