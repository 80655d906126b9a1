//! A string-typed backend used to check that the pipeline never depends on Rust syntax.

#![allow(dead_code)]

use oasparam_core::backend::{
    Capabilities, LanguageTypes, NamingCapability, StandardAccessors, TermCapability,
    TypeCapability,
};
use oasparam_core::{AppError, AppResult, RawParameterType};

#[derive(Debug, Clone, PartialEq)]
pub enum StrLanguage {}

impl LanguageTypes for StrLanguage {
    type Type = String;
    type Term = String;
    type TermName = String;
    type MethodParameter = (String, String, Option<String>);
}

pub struct StrNaming;

impl NamingCapability<StrLanguage> for StrNaming {
    fn format_method_arg_name(&self, raw: &str) -> String {
        raw.to_lowercase().replace('-', "_")
    }

    fn format_type_name(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn format_enum_member_name(&self, raw: &str) -> String {
        raw.to_uppercase()
    }

    fn pure_term_name(&self, name: &str) -> AppResult<String> {
        let escaped: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if escaped.is_empty() {
            return Err(AppError::InvalidIdentifier(name.to_string()));
        }
        Ok(escaped)
    }

    fn extract_term_name(&self, name: &String) -> String {
        name.clone()
    }

    fn method_parameter(
        &self,
        name: &String,
        tpe: &String,
        default: Option<&String>,
    ) -> (String, String, Option<String>) {
        (name.clone(), tpe.clone(), default.cloned())
    }

    fn alter_method_parameter_name(
        &self,
        param: &(String, String, Option<String>),
        name: &String,
    ) -> (String, String, Option<String>) {
        (name.clone(), param.1.clone(), param.2.clone())
    }
}

pub struct StrTerms;

impl TermCapability<StrLanguage> for StrTerms {
    fn lit_string(&self, value: &str) -> String {
        format!("{:?}", value)
    }

    fn lit_float(&self, value: f32) -> String {
        format!("{}f", value)
    }

    fn lit_double(&self, value: f64) -> String {
        format!("{}d", value)
    }

    fn lit_int(&self, value: i32) -> String {
        value.to_string()
    }

    fn lit_long(&self, value: i64) -> String {
        format!("{}L", value)
    }

    fn lit_boolean(&self, value: bool) -> String {
        value.to_string()
    }

    fn lift_optional_term(&self, term: &String) -> String {
        format!("Some({})", term)
    }

    fn empty_optional_term(&self) -> String {
        "None".to_string()
    }

    fn select_enum_member(&self, enum_type: &String, member: &String) -> String {
        format!("{}.{}", enum_type, member)
    }
}

pub struct StrTypes;

impl TypeCapability<StrLanguage> for StrTypes {
    fn lift_optional_type(&self, tpe: &String) -> String {
        format!("Option[{}]", tpe)
    }

    fn lift_vector_type(&self, tpe: &String) -> String {
        format!("Vector[{}]", tpe)
    }

    fn lift_map_type(&self, tpe: &String) -> String {
        format!("Map[String, {}]", tpe)
    }

    fn file_type(&self) -> String {
        "File".to_string()
    }

    fn json_type(&self) -> String {
        "Json".to_string()
    }

    fn model_type(&self, name: &str) -> String {
        format!("models.{}", name)
    }

    fn primitive_type(&self, raw: &RawParameterType) -> String {
        match (raw.type_name.as_deref(), raw.format.as_deref()) {
            (Some("integer"), Some("int64")) => "Long",
            (Some("integer"), _) => "Int",
            (Some("number"), Some("float")) => "Float",
            (Some("number"), _) => "Double",
            (Some("boolean"), _) => "Boolean",
            (Some("string"), Some("binary")) | (Some("file"), _) => "File",
            (Some("string"), _) => "String",
            _ => "Json",
        }
        .to_string()
    }

    fn parse_type(&self, custom: &str) -> AppResult<String> {
        Ok(custom.to_string())
    }

    fn type_name(&self, tpe: &String) -> Option<String> {
        tpe.rsplit('.').next().map(str::to_string)
    }
}

/// Owns one of each string capability set.
pub struct StrBackend {
    documents: StandardAccessors,
}

impl StrBackend {
    pub fn new() -> Self {
        Self {
            documents: StandardAccessors::new(vec!["x-str".to_string()]),
        }
    }

    pub fn capabilities(&self) -> Capabilities<'_, StrLanguage> {
        Capabilities {
            naming: &StrNaming,
            terms: &StrTerms,
            types: &StrTypes,
            documents: &self.documents,
        }
    }
}
