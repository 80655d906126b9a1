//! Promotes primitive defaults to enum member selections.

use crate::backend::{Capabilities, LanguageTypes};
use crate::catalog::ProtocolCatalog;
use crate::params::defaults::primitive_default;
use crate::params::models::Resolved;
use crate::params::types::LanguageResolved;
use crate::tracker::Tracker;
use serde_json::Value as JsonValue;

/// Replaces the default with a member selection when `resolved` names a catalog enum
/// and the declared default matches one of its raw values.
pub fn widen_enum_default<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    catalog: &ProtocolCatalog<L>,
    resolved: LanguageResolved<L>,
    declared: Option<&Tracker<JsonValue>>,
) -> LanguageResolved<L> {
    let Some(definition) = catalog.find_enum(caps.types, &resolved.tpe) else {
        return resolved;
    };
    let Some(primitive) = declared.and_then(|value| primitive_default(&resolved.raw_type, value))
    else {
        return resolved;
    };
    match definition.member(&primitive.raw_value()) {
        Some(member) => Resolved {
            default: Some(caps.terms.select_enum_member(&definition.tpe, member)),
            ..resolved
        },
        None => {
            log::debug!(
                "Default '{}' is not a member of enum '{}'",
                primitive.raw_value(),
                definition.name
            );
            resolved
        }
    }
}
