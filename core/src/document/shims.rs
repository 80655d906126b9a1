#![deny(missing_docs)]

//! # Document Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to Swagger 2.0 / OpenAPI 3.x YAML objects and keep
//! every unknown key (including `x-` extensions) in an `extra` map.

use indexmap::IndexMap;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Loosely typed keys captured next to the strongly typed fields.
pub type Extra = BTreeMap<String, JsonValue>;

/// The `type` keyword: a single name, or an OAS 3.1 list such as `["string", "null"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Multiple(Vec<String>),
}

impl TypeDecl {
    /// The first non-`null` type name.
    pub fn primary(&self) -> Option<&str> {
        match self {
            TypeDecl::Single(s) => Some(s.as_str()),
            TypeDecl::Multiple(list) => list
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
        }
    }
}

/// `additionalProperties`: either a boolean switch or a value schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `additionalProperties: true|false`
    Allowed(bool),
    /// `additionalProperties: { ... }`
    Schema(Box<ShimSchema>),
}

/// A JSON Schema fragment as found in `definitions`, `components.schemas` and `schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShimSchema {
    /// `$ref` target, if this schema is a reference.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Declared type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeDecl>,
    /// Format modifier (e.g. int64, date-time).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ShimSchema>>,
    /// Map value schema.
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,
    /// Object properties, in document order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ShimSchema>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Enumerated raw values.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<JsonValue>>,
    /// Declared default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Every other key, including vendor extensions.
    #[serde(flatten)]
    pub extra: Extra,
}

impl ShimSchema {
    /// Convenience constructor for a primitive schema.
    pub fn primitive(type_name: &str, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(TypeDecl::Single(type_name.to_string())),
            format: format.map(str::to_string),
            ..Self::default()
        }
    }

    /// Convenience constructor for a `$ref` schema.
    pub fn reference(target: &str) -> Self {
        Self {
            reference: Some(target.to_string()),
            ..Self::default()
        }
    }

    /// The primary declared type name.
    pub fn type_name(&self) -> Option<&str> {
        self.schema_type.as_ref().and_then(TypeDecl::primary)
    }

    /// True for object-like schemas (explicit `object`, or untyped with properties).
    pub fn is_object(&self) -> bool {
        match self.type_name() {
            Some("object") => true,
            None => !self.properties.is_empty(),
            Some(_) => false,
        }
    }
}

/// A parameter node (Swagger 2.0 and OpenAPI 3.x shapes share this shim).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShimParameter {
    /// Top-level `$ref`, if the parameter is a reference.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Wire name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Location (body, header, path, query, cookie, formData).
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub parameter_in: Option<String>,
    /// A brief description of the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Legacy Swagger 2.0 primitive type (e.g. string, integer, file).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Legacy Swagger 2.0 format modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Legacy Swagger 2.0 array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ShimSchema>>,
    /// Schema definition (body parameters and OAS 3.x parameters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ShimSchema>,
    /// Legacy Swagger 2.0 default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    /// Every other key, including vendor extensions.
    #[serde(flatten)]
    pub extra: Extra,
}

impl ShimParameter {
    /// Builds a parameter with a name and location; everything else is left empty.
    pub fn new(name: &str, location: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            parameter_in: Some(location.to_string()),
            ..Self::default()
        }
    }

    /// Identity key used to merge path-level and operation-level parameters.
    pub fn merge_key(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            self.reference.as_deref(),
            self.name.as_deref(),
            self.parameter_in.as_deref(),
        )
    }
}

/// Media Type Object (OAS 3.x).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShimMediaType {
    /// Payload schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ShimSchema>,
    /// Other keys.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Request Body Object (OAS 3.x).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShimRequestBody {
    /// Reference to `#/components/requestBodies/*`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the body is required.
    #[serde(default)]
    pub required: bool,
    /// Content map keyed by media type, in document order.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
    /// Other keys, including vendor extensions.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Operation Object. Only the parts relevant to parameter resolution are typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShimOperation {
    /// Unique operation identifier.
    #[serde(rename = "operationId", default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<ShimParameter>,
    /// OAS 3.x request body.
    #[serde(rename = "requestBody", default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<ShimRequestBody>,
    /// Other keys (responses, tags, ...).
    #[serde(flatten)]
    pub extra: Extra,
}

/// Path Item Object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShimPathItem {
    /// Parameters shared by every operation under this path.
    #[serde(default)]
    pub parameters: Vec<ShimParameter>,
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<ShimOperation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<ShimOperation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<ShimOperation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<ShimOperation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ShimOperation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<ShimOperation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<ShimOperation>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<ShimOperation>,
    /// Other keys.
    #[serde(flatten)]
    pub extra: Extra,
}

impl ShimPathItem {
    /// Operations in canonical method order, paired with their lowercase method name.
    pub fn operations(&self) -> Vec<(&'static str, &ShimOperation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
            ("trace", &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }
}

/// Represents the Paths Object with support for specification extensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShimPaths {
    /// Parsed path items keyed by path template, in document order.
    pub items: IndexMap<String, ShimPathItem>,
    /// Spec extensions attached to the Paths Object (x-...).
    pub extensions: Extra,
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = IndexMap::<String, JsonValue>::deserialize(deserializer)?;
        let mut items = IndexMap::new();
        let mut extensions = BTreeMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                extensions.insert(key, value);
                continue;
            }
            let path_item = serde_json::from_value::<ShimPathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, path_item);
        }

        Ok(Self { items, extensions })
    }
}

/// Components Object (OAS 3.x) holding reusable definitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShimComponents {
    /// Reusable schemas.
    #[serde(default)]
    pub schemas: IndexMap<String, ShimSchema>,
    /// Reusable parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, ShimParameter>,
    /// Reusable request bodies.
    #[serde(rename = "requestBodies", default)]
    pub request_bodies: IndexMap<String, ShimRequestBody>,
    /// Other component maps (responses, securitySchemes, ...).
    #[serde(flatten)]
    pub extra: Extra,
}

/// The root of a Swagger 2.0 or OpenAPI 3.x document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShimDocument {
    /// Swagger 2.0 version marker.
    #[serde(default)]
    pub swagger: Option<String>,
    /// OpenAPI 3.x version marker.
    #[serde(default)]
    pub openapi: Option<String>,
    /// Path items.
    #[serde(default)]
    pub paths: ShimPaths,
    /// Swagger 2.0 schema definitions.
    #[serde(default)]
    pub definitions: IndexMap<String, ShimSchema>,
    /// Swagger 2.0 reusable parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, ShimParameter>,
    /// OAS 3.x components.
    #[serde(default)]
    pub components: Option<ShimComponents>,
}

impl ShimDocument {
    /// Parses a JSON or YAML document.
    pub fn parse(content: &str) -> crate::error::AppResult<Self> {
        if content.trim_start().starts_with('{') {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// All named schemas: Swagger `definitions` followed by `components.schemas`.
    pub fn schema_definitions(&self) -> IndexMap<String, ShimSchema> {
        let mut all = self.definitions.clone();
        if let Some(components) = &self.components {
            for (name, schema) in &components.schemas {
                all.insert(name.clone(), schema.clone());
            }
        }
        all
    }
}
