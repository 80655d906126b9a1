#![deny(missing_docs)]

//! # Operation Walker
//!
//! Collects the parameter list of every operation in a document, in document order.
//!
//! - Path-level parameters are merged with operation-level ones (operation wins).
//! - Reusable `#/parameters/*` and `#/components/parameters/*` references are inlined
//!   when the document defines them; unknown references are left for the resolver to defer.
//! - An OAS 3.x `requestBody` becomes one `body` parameter, or one `formData`
//!   parameter per property for form/multipart media types.

use crate::document::refs::{extract_ref_name, extract_section_name};
use crate::document::shims::{
    ShimDocument, ShimOperation, ShimParameter, ShimRequestBody, ShimSchema,
};
use crate::tracker::Tracker;

const PARAMETER_SECTIONS: &[&str] = &["parameters", "components/parameters"];
const REQUEST_BODY_SECTIONS: &[&str] = &["components/requestBodies"];

/// Name given to the parameter synthesized from a JSON-like `requestBody`.
pub const BODY_PARAMETER_NAME: &str = "body";

/// The parameters declared for one operation, each tagged with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationParameters {
    /// Path template (e.g. `/pets/{petId}`).
    pub path: String,
    /// Lowercase HTTP method.
    pub method: String,
    /// `operationId`, if declared.
    pub operation_id: Option<String>,
    /// Parameter nodes in declaration order.
    pub parameters: Vec<Tracker<ShimParameter>>,
}

/// Walks `paths` and returns one entry per operation.
pub fn collect_operations(doc: &ShimDocument) -> Vec<OperationParameters> {
    let root = Tracker::new(());
    let mut result = Vec::new();

    for (path, item) in &doc.paths.items {
        let path_tracker = root.field("paths", ()).field(path, ());
        let shared: Vec<Tracker<ShimParameter>> = item
            .parameters
            .iter()
            .enumerate()
            .map(|(idx, param)| {
                inline_parameter_ref(doc, path_tracker.field("parameters", ()).index(idx, param))
            })
            .collect();

        for (method, operation) in item.operations() {
            let op_tracker = path_tracker.field(method, ());
            let mut parameters = shared.clone();
            for (idx, param) in operation.parameters.iter().enumerate() {
                let own = inline_parameter_ref(doc, op_tracker.field("parameters", ()).index(idx, param));
                merge_parameter(&mut parameters, own);
            }
            parameters.extend(request_body_parameters(doc, &op_tracker, operation));

            result.push(OperationParameters {
                path: path.clone(),
                method: method.to_string(),
                operation_id: operation.operation_id.clone(),
                parameters,
            });
        }
    }

    result
}

/// Replaces an entry with the same identity, or appends.
fn merge_parameter(parameters: &mut Vec<Tracker<ShimParameter>>, param: Tracker<ShimParameter>) {
    let existing = parameters
        .iter()
        .position(|p| p.get().merge_key() == param.get().merge_key());
    match existing {
        Some(pos) => parameters[pos] = param,
        None => parameters.push(param),
    }
}

/// Follows a reusable parameter reference one level, keeping the definition site as provenance.
fn inline_parameter_ref(doc: &ShimDocument, param: Tracker<&ShimParameter>) -> Tracker<ShimParameter> {
    let Some(reference) = param.get().reference.as_deref() else {
        return param.map(Clone::clone);
    };
    let Some(name) = extract_section_name(reference, PARAMETER_SECTIONS) else {
        return param.map(Clone::clone);
    };

    let root = Tracker::new(());
    if let Some(found) = doc.parameters.get(&name) {
        return root.field("parameters", ()).field(&name, found.clone());
    }
    if let Some(found) = doc
        .components
        .as_ref()
        .and_then(|c| c.parameters.get(&name))
    {
        return root
            .field("components", ())
            .field("parameters", ())
            .field(&name, found.clone());
    }

    log::debug!(
        "Parameter reference '{}' at {} is not defined in the document; deferring",
        reference,
        param.show_history()
    );
    param.map(Clone::clone)
}

fn request_body_parameters(
    doc: &ShimDocument,
    op_tracker: &Tracker<()>,
    operation: &ShimOperation,
) -> Vec<Tracker<ShimParameter>> {
    let Some(body) = operation.request_body.as_ref() else {
        return Vec::new();
    };
    let body_tracker = op_tracker.field("requestBody", ());
    let Some(body) = resolve_request_body(doc, body) else {
        log::debug!(
            "Request body at {} could not be resolved; skipping",
            body_tracker.show_history()
        );
        return Vec::new();
    };

    let Some((media_type, media)) = body.content.first() else {
        return Vec::new();
    };
    let media_tracker = body_tracker.field("content", ()).field(media_type, ());
    let schema = media.schema.clone().unwrap_or_default();

    if is_form_media(media_type) {
        let object = dereference_schema(doc, &schema);
        return object
            .properties
            .iter()
            .map(|(name, property)| {
                let param = form_parameter(name, property, object.required.contains(name));
                media_tracker
                    .field("schema", ())
                    .field("properties", ())
                    .field(name, param)
            })
            .collect();
    }

    let mut param = ShimParameter::new(BODY_PARAMETER_NAME, "body");
    param.required = body.required;
    param.description = body.description.clone();
    param.schema = Some(schema);
    param.extra = body.extra.clone();
    vec![body_tracker.field("content", ()).field(media_type, param)]
}

fn resolve_request_body<'a>(
    doc: &'a ShimDocument,
    body: &'a ShimRequestBody,
) -> Option<&'a ShimRequestBody> {
    match body.reference.as_deref() {
        None => Some(body),
        Some(reference) => {
            let name = extract_section_name(reference, REQUEST_BODY_SECTIONS)?;
            doc.components.as_ref()?.request_bodies.get(&name)
        }
    }
}

/// Looks a `$ref` schema up among the document's own definitions, one level deep.
fn dereference_schema(doc: &ShimDocument, schema: &ShimSchema) -> ShimSchema {
    match schema.reference.as_deref() {
        None => schema.clone(),
        Some(reference) => {
            let name = extract_ref_name(reference);
            doc.schema_definitions()
                .get(&name)
                .cloned()
                .unwrap_or_else(|| schema.clone())
        }
    }
}

fn is_form_media(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/x-www-form-urlencoded" || essence == "multipart/form-data"
}

/// Rewrites a form property as a Swagger 2.0 style `formData` parameter.
fn form_parameter(name: &str, property: &ShimSchema, required: bool) -> ShimParameter {
    let mut param = ShimParameter::new(name, "formData");
    param.required = required;
    param.description = property.description.clone();
    if property.reference.is_some() {
        param.schema = Some(property.clone());
        return param;
    }
    param.schema_type = property.type_name().map(str::to_string);
    param.format = property.format.clone();
    param.items = property.items.clone();
    param.default = property.default.clone();
    param.extra = property.extra.clone();
    param
}
