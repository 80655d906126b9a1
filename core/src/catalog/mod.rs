#![deny(missing_docs)]

//! # Protocol Catalog
//!
//! The read-only set of named model, enum and alias definitions that deferred
//! parameter types are reconciled against.

pub mod builder;

pub use builder::build_catalog;

use crate::backend::{LanguageTypes, TypeCapability};
use crate::params::models::RawParameterType;

/// A named object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDefinition<L: LanguageTypes> {
    /// Definition name as it appears in `$ref`.
    pub name: String,
    /// Backend type naming the model.
    pub tpe: L::Type,
    /// Declared `(type, format)`.
    pub raw_type: RawParameterType,
}

/// A named scalar schema restricted by `enum`.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDefinition<L: LanguageTypes> {
    /// Definition name as it appears in `$ref`.
    pub name: String,
    /// Backend type naming the enumeration.
    pub tpe: L::Type,
    /// Declared `(type, format)` of the member values.
    pub raw_type: RawParameterType,
    /// `(raw value, member identifier)` in declaration order.
    pub members: Vec<(String, L::TermName)>,
}

impl<L: LanguageTypes> EnumDefinition<L> {
    /// Identifier of the member whose raw value is `raw`.
    pub fn member(&self, raw: &str) -> Option<&L::TermName> {
        self.members
            .iter()
            .find(|(value, _)| value == raw)
            .map(|(_, ident)| ident)
    }
}

/// A named schema that is neither an object nor an enum (primitive, array, map or ref).
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDefinition<L: LanguageTypes> {
    /// Definition name as it appears in `$ref`.
    pub name: String,
    /// The aliased backend type.
    pub tpe: L::Type,
    /// Declared `(type, format)`.
    pub raw_type: RawParameterType,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolElem<L: LanguageTypes> {
    /// Object model.
    Model(ModelDefinition<L>),
    /// Enumeration.
    Enum(EnumDefinition<L>),
    /// Type alias.
    Alias(AliasDefinition<L>),
}

impl<L: LanguageTypes> ProtocolElem<L> {
    /// Definition name.
    pub fn name(&self) -> &str {
        match self {
            ProtocolElem::Model(m) => &m.name,
            ProtocolElem::Enum(e) => &e.name,
            ProtocolElem::Alias(a) => &a.name,
        }
    }

    /// Backend type.
    pub fn tpe(&self) -> &L::Type {
        match self {
            ProtocolElem::Model(m) => &m.tpe,
            ProtocolElem::Enum(e) => &e.tpe,
            ProtocolElem::Alias(a) => &a.tpe,
        }
    }

    /// Declared `(type, format)`.
    pub fn raw_type(&self) -> &RawParameterType {
        match self {
            ProtocolElem::Model(m) => &m.raw_type,
            ProtocolElem::Enum(e) => &e.raw_type,
            ProtocolElem::Alias(a) => &a.raw_type,
        }
    }
}

/// Ordered, immutable collection of definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolCatalog<L: LanguageTypes> {
    elems: Vec<ProtocolElem<L>>,
}

impl<L: LanguageTypes> Default for ProtocolCatalog<L> {
    fn default() -> Self {
        Self { elems: Vec::new() }
    }
}

impl<L: LanguageTypes> ProtocolCatalog<L> {
    /// Wraps pre-built definitions.
    pub fn new(elems: Vec<ProtocolElem<L>>) -> Self {
        Self { elems }
    }

    /// Looks up a definition by its `$ref` name.
    pub fn find(&self, name: &str) -> Option<&ProtocolElem<L>> {
        self.elems.iter().find(|elem| elem.name() == name)
    }

    /// The enum whose type name matches `tpe`.
    pub fn find_enum(
        &self,
        types: &dyn TypeCapability<L>,
        tpe: &L::Type,
    ) -> Option<&EnumDefinition<L>> {
        self.elems.iter().find_map(|elem| match elem {
            ProtocolElem::Enum(e) if types.type_names_equal(&e.tpe, tpe) => Some(e),
            _ => None,
        })
    }

    /// Definitions in order.
    pub fn iter(&self) -> impl Iterator<Item = &ProtocolElem<L>> {
        self.elems.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// True when the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::rust::{RustIdent, RustLanguage, RustType, RustTypes};
    use crate::backend::NamingCapability;
    use crate::backend::rust::RustNaming;

    fn ident(raw: &str) -> RustIdent {
        RustNaming.pure_term_name(raw).unwrap()
    }

    fn color() -> ProtocolElem<RustLanguage> {
        ProtocolElem::Enum(EnumDefinition {
            name: "color".into(),
            tpe: RustType::named("models::Color"),
            raw_type: RawParameterType::of("string"),
            members: vec![("red".into(), ident("Red")), ("blue".into(), ident("Blue"))],
        })
    }

    #[test]
    fn test_find_by_ref_name() {
        let catalog = ProtocolCatalog::new(vec![color()]);
        assert_eq!(catalog.find("color").map(|e| e.name()), Some("color"));
        assert!(catalog.find("Color").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_find_enum_by_type_name() {
        let catalog = ProtocolCatalog::new(vec![color()]);
        let types = RustTypes::new(RustType::named("bytes::Bytes"));
        let found = catalog.find_enum(&types, &RustType::named("Color")).unwrap();
        assert_eq!(found.member("blue"), Some(&ident("Blue")));
        assert!(found.member("green").is_none());
        assert!(catalog
            .find_enum(&types, &RustType::named("String"))
            .is_none());
    }

    #[test]
    fn test_builtin_types_never_match_enums() {
        let value = ProtocolElem::Enum(EnumDefinition {
            name: "value".into(),
            tpe: RustType::named("Value"),
            raw_type: RawParameterType::of("string"),
            members: vec![("a".into(), ident("A"))],
        });
        let catalog = ProtocolCatalog::new(vec![value]);
        let types = RustTypes::new(RustType::named("bytes::Bytes"));
        assert!(catalog
            .find_enum(&types, &RustType::named("serde_json::Value"))
            .is_none());
        assert!(catalog.find_enum(&types, &RustType::named("Value")).is_some());
    }
}
