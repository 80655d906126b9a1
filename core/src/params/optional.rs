//! Optional wrapping of non-required parameters.

use crate::backend::{Capabilities, LanguageTypes};
use crate::params::models::Resolved;
use crate::params::types::LanguageResolved;

/// Wraps type and default when the parameter is not required.
///
/// A non-required parameter always ends up with a default: the lifted declared
/// default, or the backend's empty value.
pub fn wrap_optionality<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    resolved: LanguageResolved<L>,
    required: bool,
) -> LanguageResolved<L> {
    if required {
        return resolved;
    }
    let default = match &resolved.default {
        Some(term) => caps.terms.lift_optional_term(term),
        None => caps.terms.empty_optional_term(),
    };
    Resolved {
        tpe: caps.types.lift_optional_type(&resolved.tpe),
        default: Some(default),
        raw_type: resolved.raw_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::rust::{RustBackend, RustTerm, RustType};
    use crate::params::models::RawParameterType;
    use pretty_assertions::assert_eq;

    fn int(default: Option<RustTerm>) -> Resolved<RustType, RustTerm> {
        Resolved {
            tpe: RustType::named("i32"),
            default,
            raw_type: RawParameterType::new(Some("integer"), Some("int32")),
        }
    }

    #[test]
    fn test_required_passes_through() {
        let backend = RustBackend::default();
        let caps = backend.capabilities();
        assert_eq!(wrap_optionality(caps, int(None), true), int(None));
        let with_default = int(Some(RustTerm::Int(1)));
        assert_eq!(wrap_optionality(caps, with_default.clone(), true), with_default);
    }

    #[test]
    fn test_optional_lifts_default() {
        let backend = RustBackend::default();
        let wrapped = wrap_optionality(backend.capabilities(), int(Some(RustTerm::Int(1))), false);
        assert_eq!(wrapped.tpe.to_string(), "Option<i32>");
        assert_eq!(wrapped.default.map(|t| t.to_string()).as_deref(), Some("Some(1i32)"));
    }

    #[test]
    fn test_optional_without_default_gets_empty() {
        let backend = RustBackend::default();
        let wrapped = wrap_optionality(backend.capabilities(), int(None), false);
        assert_eq!(wrapped.default, Some(RustTerm::None));
    }
}
