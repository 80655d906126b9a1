//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Resolution failures are scoped to a single parameter. Callers decide whether
//! one failure aborts a whole document (see `resolution::FailurePolicy`).

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON document could not be decoded.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML document could not be decoded.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A deferred reference names an entry that the protocol catalog does not contain.
    #[from(ignore)]
    #[display("Unresolvable reference '{name}' at {trail}")]
    UnresolvableReference {
        /// The referenced catalog name.
        name: String,
        /// Provenance of the parameter that carried the reference.
        trail: String,
    },

    /// No location predicate matched and the backend fallback also refused the parameter.
    #[from(ignore)]
    #[display("Unclassifiable parameter at {trail}: {reason}")]
    UnclassifiableParameter {
        /// Provenance of the parameter node.
        trail: String,
        /// Human readable cause.
        reason: String,
    },

    /// A field required to build the parameter record is absent.
    #[from(ignore)]
    #[display("Missing field '{field}' at {trail}")]
    MissingField {
        /// Field name as written in the document.
        field: String,
        /// Provenance of the enclosing node.
        trail: String,
    },

    /// A name could not be turned into a target-language identifier.
    #[from(ignore)]
    #[display("Invalid identifier '{_0}'")]
    InvalidIdentifier(String),

    /// A custom type override could not be parsed by the backend.
    #[from(ignore)]
    #[display("Invalid type override '{_0}'")]
    InvalidType(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_unresolvable_reference_display() {
        let err = AppError::UnresolvableReference {
            name: "Pet".into(),
            trail: ".paths./pets.get.parameters[0]".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unresolvable reference 'Pet' at .paths./pets.get.parameters[0]"
        );
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(app_err.to_string().starts_with("JSON Error:"));
    }
}
