//! Identifier collision resolution across one parameter list.

use crate::backend::{LanguageTypes, NamingCapability};
use crate::error::AppResult;
use crate::params::models::LanguageParameter;
use std::collections::HashMap;

/// Renames every parameter whose identifier occurs more than once, using an
/// identifier escaped from its raw wire name instead.
///
/// Must run after the whole list is resolved. Applying it twice is the same as
/// applying it once.
pub fn deduplicate_identifiers<L: LanguageTypes>(
    naming: &dyn NamingCapability<L>,
    parameters: Vec<LanguageParameter<L>>,
) -> AppResult<Vec<LanguageParameter<L>>> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for param in &parameters {
        *counts
            .entry(naming.extract_term_name(&param.param_name))
            .or_default() += 1;
    }

    parameters
        .into_iter()
        .map(|param| {
            let current = naming.extract_term_name(&param.param_name);
            if counts.get(&current).copied().unwrap_or_default() < 2 {
                return Ok(param);
            }
            let escaped = naming.pure_term_name(param.arg_name.as_str())?;
            if escaped == param.param_name {
                return Ok(param);
            }
            log::debug!(
                "Renaming parameter '{}' from {} to {}",
                param.arg_name,
                current,
                naming.extract_term_name(&escaped)
            );
            let symbol = naming.alter_method_parameter_name(&param.param, &escaped);
            Ok(param.with_identifier(symbol, escaped))
        })
        .collect()
}
