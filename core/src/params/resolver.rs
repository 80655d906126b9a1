//! # Parameter Resolution Pipeline
//!
//! classify -> resolve type -> reconcile -> enum default -> optional wrap -> record.
//! Deduplication runs once the whole list has resolved.

use crate::backend::{Capabilities, LanguageTypes};
use crate::catalog::ProtocolCatalog;
use crate::document::shims::ShimParameter;
use crate::error::AppResult;
use crate::params::classify::{classify, ParameterCategory};
use crate::params::dedup::deduplicate_identifiers;
use crate::params::enums::widen_enum_default;
use crate::params::models::{LanguageParameter, LanguageParameters, RawParameterName};
use crate::params::optional::wrap_optionality;
use crate::params::types::{reconcile, resolve_parameter_type};
use crate::tracker::Tracker;

/// Hash algorithm hints generated code knows how to compute.
const KNOWN_HASH_ALGORITHMS: &[&str] = &["MD5", "SHA-1", "SHA-256", "SHA-384", "SHA-512"];

/// Resolves one parameter node into a record.
pub fn resolve_parameter<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    catalog: &ProtocolCatalog<L>,
    param: &Tracker<&ShimParameter>,
) -> AppResult<LanguageParameter<L>> {
    let documents = caps.documents;
    let category = classify(documents, param);

    let raw_name = match documents.parameter_name(param) {
        Ok(name) => name,
        Err(err) => match &category {
            ParameterCategory::Reference(target) => param.field("$ref", target.clone()),
            _ => return Err(err),
        },
    };

    let phase_one = resolve_parameter_type(caps, param, &category)?;
    let resolved = reconcile(caps, catalog, phase_one, param)?;
    let declared_default = documents.declared_default(param);
    let resolved = widen_enum_default(caps, catalog, resolved, declared_default.as_ref());

    let is_file = caps.types.types_equal(&resolved.tpe, &caps.types.file_type());
    let required = param.get().required;
    let resolved = wrap_optionality(caps, resolved, required);

    let hash_algorithm = documents.file_hash_algorithm(param).map(|hint| {
        if !KNOWN_HASH_ALGORITHMS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(hint.get()))
        {
            log::warn!("Unrecognized file hash algorithm {}", hint);
        }
        hint.into_inner()
    });

    let naming = caps.naming;
    let param_name = naming.pure_term_name(&naming.format_method_arg_name(raw_name.get()))?;
    let symbol = naming.method_parameter(&param_name, &resolved.tpe, resolved.default.as_ref());

    Ok(LanguageParameter {
        location: documents.parameter_location(param).map(Tracker::into_inner),
        param: symbol,
        param_name,
        arg_name: RawParameterName::new(raw_name.into_inner()),
        arg_type: resolved.tpe,
        default_value: resolved.default,
        raw_type: resolved.raw_type,
        required,
        hash_algorithm,
        is_file,
    })
}

/// Resolves every node independently; one failure does not affect the others.
pub fn resolve_each<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    catalog: &ProtocolCatalog<L>,
    params: &[Tracker<ShimParameter>],
) -> Vec<AppResult<LanguageParameter<L>>> {
    params
        .iter()
        .map(|param| resolve_parameter(caps, catalog, &param.as_ref()))
        .collect()
}

/// Resolves a whole list, stopping at the first failure, then deduplicates identifiers.
pub fn resolve_parameters<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    catalog: &ProtocolCatalog<L>,
    params: &[Tracker<ShimParameter>],
) -> AppResult<LanguageParameters<L>> {
    let resolved = resolve_each(caps, catalog, params)
        .into_iter()
        .collect::<AppResult<Vec<_>>>()?;
    let deduped = deduplicate_identifiers(caps.naming, resolved)?;
    Ok(LanguageParameters::new(deduped))
}
