mod support;

use oasparam_core::backend::{Capabilities, LanguageTypes, NamingCapability};
use oasparam_core::catalog::{EnumDefinition, ProtocolCatalog, ProtocolElem};
use oasparam_core::params::classify::{classify, ParameterCategory};
use oasparam_core::{
    build_catalog, deduplicate_identifiers, resolve_parameter, AppError, LanguageParameter,
    RawParameterType, RustBackend, RustLanguage, ShimDocument, ShimParameter, ShimSchema,
    Tracker,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{StrBackend, StrLanguage};

fn resolve<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    catalog: &ProtocolCatalog<L>,
    param: &ShimParameter,
) -> LanguageParameter<L> {
    resolve_parameter(caps, catalog, &Tracker::new(param)).unwrap()
}

fn legacy(name: &str, location: &str, ty: &str, format: Option<&str>) -> ShimParameter {
    let mut param = ShimParameter::new(name, location);
    param.schema_type = Some(ty.to_string());
    param.format = format.map(str::to_string);
    param
}

fn sample_parameters() -> Vec<ShimParameter> {
    let mut with_default = legacy("limit", "query", "integer", Some("int32"));
    with_default.default = Some(json!(10));
    let mut body = ShimParameter::new("body", "body");
    body.schema = Some(ShimSchema::primitive("object", None));
    let mut cookie = ShimParameter::new("session", "cookie");
    cookie.schema = Some(ShimSchema::primitive("string", None));
    vec![
        with_default,
        legacy("X-Trace", "header", "string", None),
        legacy("id", "path", "integer", Some("int64")),
        legacy("flag", "formData", "boolean", None),
        body,
        cookie,
    ]
}

#[test]
fn required_parameters_are_never_optional() {
    let backend = StrBackend::new();
    let caps = backend.capabilities();
    for mut param in sample_parameters() {
        param.required = true;
        let had_default = param.default.is_some();
        let resolved = resolve(caps, &ProtocolCatalog::default(), &param);
        assert!(!resolved.arg_type().starts_with("Option["), "{:?}", resolved);
        assert_eq!(resolved.default_value().is_some(), had_default, "{:?}", resolved);
    }
}

#[test]
fn optional_parameters_always_have_a_default() {
    let backend = StrBackend::new();
    let caps = backend.capabilities();
    for param in sample_parameters() {
        let resolved = resolve(caps, &ProtocolCatalog::default(), &param);
        assert!(resolved.arg_type().starts_with("Option["), "{:?}", resolved);
        let default = resolved.default_value().unwrap();
        assert!(default == "None" || default.starts_with("Some("), "{}", default);
    }

    let limit = resolve(caps, &ProtocolCatalog::default(), &sample_parameters()[0]);
    assert_eq!(limit.default_value().map(String::as_str), Some("Some(10)"));
}

const ALIASES: &str = r#"
swagger: "2.0"
info: { title: t, version: "1" }
paths: {}
definitions:
  Id:
    type: integer
    format: int64
  Tags:
    type: array
    items: { type: string }
"#;

fn reference_round_trip<L: LanguageTypes>(caps: Capabilities<'_, L>) {
    let doc = ShimDocument::parse(ALIASES).unwrap();
    let definitions = doc.schema_definitions();
    let catalog = build_catalog(caps, &definitions).unwrap();

    for (name, schema) in &definitions {
        let mut by_ref = ShimParameter::new("p", "query");
        by_ref.schema = Some(ShimSchema::reference(&format!("#/definitions/{}", name)));
        let mut inline = ShimParameter::new("p", "query");
        inline.schema = Some(schema.clone());

        let via_catalog = resolve(caps, &catalog, &by_ref);
        let direct = resolve(caps, &ProtocolCatalog::default(), &inline);
        assert_eq!(via_catalog.arg_type(), direct.arg_type(), "{}", name);
    }
}

#[test]
fn reference_round_trip_rust() {
    let backend = RustBackend::default();
    reference_round_trip(backend.capabilities());
}

#[test]
fn reference_round_trip_strings() {
    let backend = StrBackend::new();
    reference_round_trip(backend.capabilities());
}

#[test]
fn enum_default_selects_member() {
    let backend = StrBackend::new();
    let caps = backend.capabilities();
    let catalog = ProtocolCatalog::<StrLanguage>::new(vec![ProtocolElem::Enum(EnumDefinition {
        name: "Color".into(),
        tpe: "models.Color".into(),
        raw_type: RawParameterType::of("string"),
        members: vec![("red".into(), "RED".into()), ("blue".into(), "BLUE".into())],
    })]);

    let mut param = ShimParameter::new("color", "query");
    param.required = true;
    param.default = Some(json!("red"));
    param.schema = Some(ShimSchema::reference("#/definitions/Color"));

    let resolved = resolve(caps, &catalog, &param);
    assert_eq!(resolved.arg_type(), "models.Color");
    assert_eq!(resolved.default_value().map(String::as_str), Some("models.Color.RED"));

    param.required = false;
    let resolved = resolve(caps, &catalog, &param);
    assert_eq!(
        resolved.default_value().map(String::as_str),
        Some("Some(models.Color.RED)")
    );
}

#[test]
fn enum_default_from_document() {
    let doc = ShimDocument::parse(
        r#"
openapi: 3.0.0
info: { title: t, version: "1" }
paths: {}
components:
  schemas:
    Color:
      type: string
      enum: [red, blue]
"#,
    )
    .unwrap();
    let backend = RustBackend::default();
    let caps = backend.capabilities();
    let catalog = build_catalog(caps, &doc.schema_definitions()).unwrap();

    let mut param = ShimParameter::new("color", "query");
    let mut schema = ShimSchema::reference("#/components/schemas/Color");
    schema.default = Some(json!("blue"));
    param.schema = Some(schema);

    let resolved = resolve(caps, &catalog, &param);
    assert_eq!(resolved.arg_type().to_string(), "Option<Color>");
    assert_eq!(
        resolved.default_value().map(ToString::to_string).as_deref(),
        Some("Some(Color::Blue)")
    );
}

#[test]
fn whole_number_double_enum_default_selects_member() {
    let doc = ShimDocument::parse(
        r#"
openapi: 3.0.0
info: { title: t, version: "1" }
paths: {}
components:
  schemas:
    Ratio:
      type: number
      format: double
      enum: [1.0, 2.5]
"#,
    )
    .unwrap();
    let backend = RustBackend::default();
    let caps = backend.capabilities();
    let catalog = build_catalog(caps, &doc.schema_definitions()).unwrap();

    for (default, expected) in [(json!(1.0), "Ratio::_1"), (json!(2.5), "Ratio::_25")] {
        let mut param = ShimParameter::new("ratio", "query");
        param.required = true;
        let mut schema = ShimSchema::reference("#/components/schemas/Ratio");
        schema.default = Some(default);
        param.schema = Some(schema);

        let resolved = resolve(caps, &catalog, &param);
        assert_eq!(
            resolved.default_value().map(ToString::to_string).as_deref(),
            Some(expected)
        );
    }
}

fn colliding<L: LanguageTypes>(caps: Capabilities<'_, L>) -> Vec<LanguageParameter<L>> {
    ["value", "Value", "other"]
        .iter()
        .map(|name| resolve(caps, &ProtocolCatalog::default(), &legacy(name, "query", "string", None)))
        .collect()
}

fn identifiers<L: LanguageTypes>(
    naming: &dyn NamingCapability<L>,
    params: &[LanguageParameter<L>],
) -> Vec<String> {
    params
        .iter()
        .map(|p| naming.extract_term_name(p.param_name()))
        .collect()
}

#[test]
fn deduplication_resolves_collisions() {
    let backend = StrBackend::new();
    let caps = backend.capabilities();
    let params = colliding(caps);
    assert_eq!(identifiers(caps.naming, &params), vec!["value", "value", "other"]);

    let deduped = deduplicate_identifiers(caps.naming, params).unwrap();
    let names = identifiers(caps.naming, &deduped);
    assert_eq!(names, vec!["value", "Value", "other"]);
    assert_eq!(deduped[1].param().0, "Value");
}

#[test]
fn deduplication_is_idempotent() {
    let backend = RustBackend::default();
    let caps = backend.capabilities();
    let once = deduplicate_identifiers(caps.naming, colliding(caps)).unwrap();
    let twice = deduplicate_identifiers(caps.naming, once.clone()).unwrap();
    assert_eq!(once, twice);

    let mut names = identifiers(caps.naming, &once);
    names.sort();
    names.dedup();
    assert_eq!(names.len(), once.len());
}

#[test]
fn file_detection_ignores_location() {
    let backend = RustBackend::default();
    let caps = backend.capabilities();

    let mut header = legacy("X-Blob", "header", "string", None);
    header.extra.insert("x-rust-type".into(), json!("bytes::Bytes"));
    let mut body = ShimParameter::new("body", "body");
    body.required = true;
    body.schema = Some(ShimSchema::primitive("string", Some("binary")));
    let form = legacy("upload", "formData", "file", None);

    for param in [header, body, form] {
        let resolved = resolve(caps, &ProtocolCatalog::default(), &param);
        assert!(resolved.is_file(), "{:?}", resolved.arg_name());
    }

    let plain = resolve(caps, &ProtocolCatalog::default(), &legacy("name", "formData", "string", None));
    assert!(!plain.is_file());
}

#[test]
fn reference_outranks_location() {
    let backend = StrBackend::new();
    let caps = backend.capabilities();
    let mut param = ShimParameter::new("limit", "query");
    param.reference = Some("#/parameters/Limit".into());
    param.schema_type = Some("integer".into());

    assert_eq!(
        classify(caps.documents, &Tracker::new(&param)),
        ParameterCategory::Reference("Limit".into())
    );
    let err = resolve_parameter(caps, &ProtocolCatalog::default(), &Tracker::new(&param))
        .unwrap_err();
    assert!(matches!(err, AppError::UnresolvableReference { ref name, .. } if name == "Limit"));
}

#[test]
fn rust_backend_output() {
    let backend = RustBackend::default();
    let caps = backend.capabilities();
    let mut param = legacy("type", "query", "integer", Some("int64"));
    param.default = Some(json!(5));
    let resolved = resolve::<RustLanguage>(caps, &ProtocolCatalog::default(), &param);
    assert_eq!(resolved.param().to_string(), "r#type: Option<i64>");
    assert_eq!(
        resolved.default_value().map(ToString::to_string).as_deref(),
        Some("Some(5i64)")
    );
}
