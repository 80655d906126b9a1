#![deny(missing_docs)]

//! # Rust Backend
//!
//! Capability sets producing Rust syntax: snake_case arguments, `Option<T>` for
//! absent values, `Vec`/`HashMap` containers and `serde_json::Value` for untyped data.
//!
//! Updates include support for the **OAS Format Registry**:
//! - `format: float` -> `f32`
//! - `format: double` -> `f64`
//! - `format: binary` / `type: file` -> the configured file-upload type

use crate::backend::accessors::StandardAccessors;
use crate::backend::traits::{
    Capabilities, LanguageTypes, NamingCapability, TermCapability, TypeCapability,
};
use crate::error::{AppError, AppResult};
use crate::params::models::RawParameterType;
use heck::{ToSnakeCase, ToUpperCamelCase};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const STRICT_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv",
    "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Paths of types this backend emits itself; these never name a catalog definition.
const BUILTIN_TYPES: &[&str] = &[
    "bool",
    "i32",
    "i64",
    "f32",
    "f64",
    "String",
    "uuid::Uuid",
    "chrono::NaiveDate",
    "serde_json::Value",
];

/// A Rust type expression (`path<args..>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RustType {
    /// Path, possibly qualified (e.g. `serde_json::Value`).
    pub path: String,
    /// Generic arguments.
    pub args: Vec<RustType>,
}

impl RustType {
    /// A non-generic type.
    pub fn named(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            args: Vec::new(),
        }
    }

    /// A generic type.
    pub fn generic(path: impl Into<String>, args: Vec<RustType>) -> Self {
        Self {
            path: path.into(),
            args,
        }
    }

    /// The last path segment (`serde_json::Value` -> `Value`).
    pub fn last_segment(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

/// A Rust value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum RustTerm {
    /// `"text".to_string()`
    Str(String),
    /// `1.5f32`
    Float(f32),
    /// `1.5f64`
    Double(f64),
    /// `1i32`
    Int(i32),
    /// `1i64`
    Long(i64),
    /// `true`
    Bool(bool),
    /// `Some(inner)`
    Some(Box<RustTerm>),
    /// `None`
    None,
    /// `Path::To::Member`
    Path(Vec<String>),
}

impl fmt::Display for RustTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RustTerm::Str(s) => write!(f, "{:?}.to_string()", s),
            RustTerm::Float(v) => write!(f, "{:?}f32", v),
            RustTerm::Double(v) => write!(f, "{:?}f64", v),
            RustTerm::Int(v) => write!(f, "{}i32", v),
            RustTerm::Long(v) => write!(f, "{}i64", v),
            RustTerm::Bool(v) => write!(f, "{}", v),
            RustTerm::Some(inner) => write!(f, "Some({})", inner),
            RustTerm::None => f.write_str("None"),
            RustTerm::Path(segments) => f.write_str(&segments.join("::")),
        }
    }
}

/// A valid Rust identifier (possibly `r#`-escaped).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RustIdent(String);

impl RustIdent {
    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RustIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A function parameter: `name: ty`, with the default the caller should fill in.
#[derive(Debug, Clone, PartialEq)]
pub struct RustParam {
    /// Identifier.
    pub name: RustIdent,
    /// Declared type.
    pub ty: RustType,
    /// Default value expression.
    pub default: Option<RustTerm>,
}

impl fmt::Display for RustParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// Marker for the Rust target.
#[derive(Debug, Clone, PartialEq)]
pub enum RustLanguage {}

impl LanguageTypes for RustLanguage {
    type Type = RustType;
    type Term = RustTerm;
    type TermName = RustIdent;
    type MethodParameter = RustParam;
}

/// Rust naming rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustNaming;

fn invalid_ident_chars() -> &'static Regex {
    static INVALID_RE: OnceLock<Regex> = OnceLock::new();
    INVALID_RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("Invalid regex"))
}

impl NamingCapability<RustLanguage> for RustNaming {
    fn format_method_arg_name(&self, raw: &str) -> String {
        raw.to_snake_case()
    }

    fn format_type_name(&self, raw: &str) -> String {
        raw.to_upper_camel_case()
    }

    fn format_enum_member_name(&self, raw: &str) -> String {
        let formatted = raw.to_upper_camel_case();
        if formatted.is_empty() {
            "Empty".to_string()
        } else {
            formatted
        }
    }

    fn pure_term_name(&self, name: &str) -> AppResult<RustIdent> {
        let sanitized = invalid_ident_chars().replace_all(name, "_").into_owned();
        if sanitized.is_empty() {
            return Err(AppError::InvalidIdentifier(name.to_string()));
        }
        if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok(RustIdent(format!("_{}", sanitized)));
        }
        if NON_RAW_KEYWORDS.contains(&sanitized.as_str()) {
            return Ok(RustIdent(format!("{}_", sanitized)));
        }
        if STRICT_KEYWORDS.contains(&sanitized.as_str()) {
            return Ok(RustIdent(format!("r#{}", sanitized)));
        }
        Ok(RustIdent(sanitized))
    }

    fn extract_term_name(&self, name: &RustIdent) -> String {
        name.0.clone()
    }

    fn method_parameter(
        &self,
        name: &RustIdent,
        tpe: &RustType,
        default: Option<&RustTerm>,
    ) -> RustParam {
        RustParam {
            name: name.clone(),
            ty: tpe.clone(),
            default: default.cloned(),
        }
    }

    fn alter_method_parameter_name(&self, param: &RustParam, name: &RustIdent) -> RustParam {
        RustParam {
            name: name.clone(),
            ..param.clone()
        }
    }
}

/// Rust literal construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTerms;

impl TermCapability<RustLanguage> for RustTerms {
    fn lit_string(&self, value: &str) -> RustTerm {
        RustTerm::Str(value.to_string())
    }

    fn lit_float(&self, value: f32) -> RustTerm {
        RustTerm::Float(value)
    }

    fn lit_double(&self, value: f64) -> RustTerm {
        RustTerm::Double(value)
    }

    fn lit_int(&self, value: i32) -> RustTerm {
        RustTerm::Int(value)
    }

    fn lit_long(&self, value: i64) -> RustTerm {
        RustTerm::Long(value)
    }

    fn lit_boolean(&self, value: bool) -> RustTerm {
        RustTerm::Bool(value)
    }

    fn lift_optional_term(&self, term: &RustTerm) -> RustTerm {
        RustTerm::Some(Box::new(term.clone()))
    }

    fn empty_optional_term(&self) -> RustTerm {
        RustTerm::None
    }

    fn select_enum_member(&self, enum_type: &RustType, member: &RustIdent) -> RustTerm {
        RustTerm::Path(vec![enum_type.path.clone(), member.0.clone()])
    }
}

/// Rust type construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RustTypes {
    file_type: RustType,
}

impl RustTypes {
    /// Types using `file_type` as the upload sentinel.
    pub fn new(file_type: RustType) -> Self {
        Self { file_type }
    }
}

impl TypeCapability<RustLanguage> for RustTypes {
    fn lift_optional_type(&self, tpe: &RustType) -> RustType {
        RustType::generic("Option", vec![tpe.clone()])
    }

    fn lift_vector_type(&self, tpe: &RustType) -> RustType {
        RustType::generic("Vec", vec![tpe.clone()])
    }

    fn lift_map_type(&self, tpe: &RustType) -> RustType {
        RustType::generic(
            "std::collections::HashMap",
            vec![RustType::named("String"), tpe.clone()],
        )
    }

    fn file_type(&self) -> RustType {
        self.file_type.clone()
    }

    fn json_type(&self) -> RustType {
        RustType::named("serde_json::Value")
    }

    fn model_type(&self, name: &str) -> RustType {
        RustType::named(name)
    }

    fn primitive_type(&self, raw: &RawParameterType) -> RustType {
        let format = raw.format.as_deref();
        match raw.type_name.as_deref() {
            Some("integer") => match format {
                Some("int64") => RustType::named("i64"),
                _ => RustType::named("i32"),
            },
            Some("number") => match format {
                Some("float") => RustType::named("f32"),
                // Default for number without format is f64 in Rust
                _ => RustType::named("f64"),
            },
            Some("boolean") => RustType::named("bool"),
            Some("string") => match format {
                Some("uuid") => RustType::named("uuid::Uuid"),
                Some("date-time") => RustType::generic(
                    "chrono::DateTime",
                    vec![RustType::named("chrono::Utc")],
                ),
                Some("date") => RustType::named("chrono::NaiveDate"),
                Some("binary") => self.file_type(),
                _ => RustType::named("String"),
            },
            Some("file") => self.file_type(),
            Some("array") => self.lift_vector_type(&self.json_type()),
            _ => self.json_type(),
        }
    }

    fn parse_type(&self, custom: &str) -> AppResult<RustType> {
        parse_rust_type(custom)
    }

    fn type_name(&self, tpe: &RustType) -> Option<String> {
        let builtin = BUILTIN_TYPES.contains(&tpe.path.as_str()) || tpe.path == self.file_type.path;
        if builtin || !tpe.args.is_empty() {
            return None;
        }
        Some(tpe.last_segment().to_string())
    }
}

/// Parses a type expression such as `std::collections::HashMap<String, Vec<i64>>`.
pub fn parse_rust_type(input: &str) -> AppResult<RustType> {
    let mut parser = TypeParser::new(input);
    let tpe = parser.parse()?;
    parser.expect_end()?;
    Ok(tpe)
}

struct TypeParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self) -> AppError {
        AppError::InvalidType(self.input.to_string())
    }

    fn skip_ws(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn parse(&mut self) -> AppResult<RustType> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == ':' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        let path = self.input[start..self.pos].to_string();
        if path.is_empty() || path.starts_with(':') || path.ends_with(':') {
            return Err(self.error());
        }

        self.skip_ws();
        let mut args = Vec::new();
        if self.peek() == Some('<') {
            self.pos += 1;
            loop {
                args.push(self.parse()?);
                self.skip_ws();
                match self.peek() {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error()),
                }
            }
        }
        Ok(RustType { path, args })
    }

    fn expect_end(&mut self) -> AppResult<()> {
        self.skip_ws();
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.error())
        }
    }
}

/// Configuration for the Rust backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RustBackendConfig {
    /// Type used for file uploads (e.g. `bytes::Bytes`).
    pub file_type: String,
    /// Vendor extension prefixes, most specific first.
    pub vendor_prefixes: Vec<String>,
}

impl Default for RustBackendConfig {
    fn default() -> Self {
        Self {
            file_type: DEFAULT_FILE_TYPE.to_string(),
            vendor_prefixes: vec!["x-rust".to_string(), "x-oasparam".to_string()],
        }
    }
}

/// Default file-upload type.
pub const DEFAULT_FILE_TYPE: &str = "bytes::Bytes";

/// The four Rust capability sets, owned together.
#[derive(Debug, Clone)]
pub struct RustBackend {
    naming: RustNaming,
    terms: RustTerms,
    types: RustTypes,
    documents: StandardAccessors,
}

impl RustBackend {
    /// Builds the backend, validating the configured file type.
    pub fn new(config: RustBackendConfig) -> AppResult<Self> {
        let file_type = parse_rust_type(&config.file_type)?;
        Ok(Self {
            naming: RustNaming,
            terms: RustTerms,
            types: RustTypes::new(file_type),
            documents: StandardAccessors::new(config.vendor_prefixes),
        })
    }

    /// Borrows the capability bundle.
    pub fn capabilities(&self) -> Capabilities<'_, RustLanguage> {
        Capabilities {
            naming: &self.naming,
            terms: &self.terms,
            types: &self.types,
            documents: &self.documents,
        }
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        let config = RustBackendConfig::default();
        Self {
            naming: RustNaming,
            terms: RustTerms,
            types: RustTypes::new(RustType::named(DEFAULT_FILE_TYPE)),
            documents: StandardAccessors::new(config.vendor_prefixes),
        }
    }
}
