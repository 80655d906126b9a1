#![deny(missing_docs)]

//! # Document Resolution
//!
//! Resolves every operation of a document against a pre-built catalog.
//! Operations are independent and resolve in parallel; identifier deduplication
//! runs per operation once all of its parameters are resolved.

use crate::backend::{Capabilities, LanguageTypes};
use crate::catalog::ProtocolCatalog;
use crate::document::operations::{collect_operations, OperationParameters};
use crate::document::shims::ShimDocument;
use crate::error::{AppError, AppResult};
use crate::params::dedup::deduplicate_identifiers;
use crate::params::models::LanguageParameters;
use crate::params::resolver::resolve_each;
use rayon::prelude::*;

/// What to do when a parameter fails to resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort on the first failure, in document order.
    #[default]
    FailFast,
    /// Keep going; failed parameters are reported and left out of their operation.
    Collect,
}

/// Resolved parameters of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOperation<L: LanguageTypes> {
    /// Path template.
    pub path: String,
    /// Lowercase HTTP method.
    pub method: String,
    /// `operationId`, if declared.
    pub operation_id: Option<String>,
    /// Grouped parameters.
    pub parameters: LanguageParameters<L>,
}

/// A parameter that failed under `FailurePolicy::Collect`.
#[derive(Debug)]
pub struct ParameterFailure {
    /// Path template of the operation.
    pub path: String,
    /// HTTP method of the operation.
    pub method: String,
    /// Cause.
    pub error: AppError,
}

/// Outcome of resolving a whole document.
#[derive(Debug)]
pub struct DocumentResolution<L: LanguageTypes> {
    /// Operations in document order.
    pub operations: Vec<ResolvedOperation<L>>,
    /// Failures, in document order (always empty under `FailFast`).
    pub failures: Vec<ParameterFailure>,
}

impl<L: LanguageTypes> DocumentResolution<L> {
    /// Total number of resolved parameters.
    pub fn parameter_count(&self) -> usize {
        self.operations
            .iter()
            .map(|op| op.parameters.parameters.len())
            .sum()
    }
}

/// Resolves every operation in `doc`.
pub fn resolve_document<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    catalog: &ProtocolCatalog<L>,
    doc: &ShimDocument,
    policy: FailurePolicy,
) -> AppResult<DocumentResolution<L>> {
    let operations = collect_operations(doc);
    log::debug!("Resolving {} operations", operations.len());

    let outcomes: Vec<(ResolvedOperation<L>, Vec<ParameterFailure>)> = operations
        .par_iter()
        .map(|operation| resolve_operation(caps, catalog, operation))
        .collect::<AppResult<Vec<_>>>()?;

    let mut resolution = DocumentResolution {
        operations: Vec::with_capacity(outcomes.len()),
        failures: Vec::new(),
    };
    for (operation, failures) in outcomes {
        if policy == FailurePolicy::FailFast {
            if let Some(first) = failures.into_iter().next() {
                return Err(first.error);
            }
        } else {
            resolution.failures.extend(failures);
        }
        resolution.operations.push(operation);
    }
    Ok(resolution)
}

fn resolve_operation<L: LanguageTypes>(
    caps: Capabilities<'_, L>,
    catalog: &ProtocolCatalog<L>,
    operation: &OperationParameters,
) -> AppResult<(ResolvedOperation<L>, Vec<ParameterFailure>)> {
    let mut resolved = Vec::with_capacity(operation.parameters.len());
    let mut failures = Vec::new();
    for result in resolve_each(caps, catalog, &operation.parameters) {
        match result {
            Ok(param) => resolved.push(param),
            Err(error) => failures.push(ParameterFailure {
                path: operation.path.clone(),
                method: operation.method.clone(),
                error,
            }),
        }
    }

    let parameters = LanguageParameters::new(deduplicate_identifiers(caps.naming, resolved)?);
    Ok((
        ResolvedOperation {
            path: operation.path.clone(),
            method: operation.method.clone(),
            operation_id: operation.operation_id.clone(),
            parameters,
        },
        failures,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RustBackend;
    use crate::catalog::build_catalog;

    const DOC: &str = r##"
swagger: "2.0"
info: { title: t, version: "1" }
paths:
  /pets:
    get:
      parameters:
        - { name: limit, in: query, type: integer, format: int32, default: 20 }
        - { $ref: "#/parameters/Missing" }
    post:
      parameters:
        - { name: body, in: body, required: true, schema: { $ref: "#/definitions/Pet" } }
definitions:
  Pet:
    type: object
    properties:
      name: { type: string }
"##;

    fn run(policy: FailurePolicy) -> AppResult<DocumentResolution<crate::backend::RustLanguage>> {
        let doc = ShimDocument::parse(DOC).unwrap();
        let backend = RustBackend::default();
        let caps = backend.capabilities();
        let catalog = build_catalog(caps, &doc.schema_definitions()).unwrap();
        resolve_document(caps, &catalog, &doc, policy)
    }

    #[test]
    fn test_fail_fast_reports_first_error() {
        let err = run(FailurePolicy::FailFast).unwrap_err();
        assert!(matches!(err, AppError::UnresolvableReference { ref name, .. } if name == "Missing"));
    }

    #[test]
    fn test_collect_keeps_going() {
        let resolution = run(FailurePolicy::Collect).unwrap();
        assert_eq!(resolution.operations.len(), 2);
        assert_eq!(resolution.failures.len(), 1);
        assert_eq!(resolution.failures[0].method, "get");
        assert_eq!(resolution.parameter_count(), 2);

        let post = &resolution.operations[1];
        let body = post.parameters.body_param.as_ref().unwrap();
        assert_eq!(body.arg_type().to_string(), "Pet");
        assert!(body.required());
    }
}
