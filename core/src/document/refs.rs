#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for reading `$ref` strings. No external document is ever fetched:
//! a reference is reduced to the name of the entry it points at.

use percent_encoding::percent_decode_str;

/// Extracts the simple name from a reference string.
/// e.g. `#/components/schemas/User` -> `User`, `models.yaml#/definitions/Pet%20Food` -> `Pet Food`
pub fn extract_ref_name(ref_loc: &str) -> String {
    let pointer = match ref_loc.split_once('#') {
        Some((_, fragment)) => fragment,
        None => ref_loc,
    };
    let last = pointer.split('/').next_back().unwrap_or_default();
    decode_pointer_segment(last)
}

/// Extracts a component name from a local `$ref` if it points into one of the given sections.
///
/// `sections` are pointer prefixes without the leading `#/`, e.g. `["parameters", "components/parameters"]`.
pub fn extract_section_name(ref_str: &str, sections: &[&str]) -> Option<String> {
    let pointer = ref_str.strip_prefix("#/")?;
    sections.iter().find_map(|section| {
        let rest = pointer.strip_prefix(section)?.strip_prefix('/')?;
        if rest.is_empty() || rest.contains('/') {
            return None;
        }
        Some(decode_pointer_segment(rest))
    })
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent encoding).
pub fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ref_name_local() {
        assert_eq!(extract_ref_name("#/definitions/Pet"), "Pet");
        assert_eq!(extract_ref_name("#/components/schemas/User"), "User");
    }

    #[test]
    fn test_extract_ref_name_remote() {
        assert_eq!(
            extract_ref_name("models.yaml#/definitions/Pet%20Food"),
            "Pet Food"
        );
    }

    #[test]
    fn test_extract_ref_name_bare() {
        assert_eq!(extract_ref_name("Color"), "Color");
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        let encoded = "User%20Profile~1details";
        assert_eq!(decode_pointer_segment(encoded), "User Profile/details");
    }

    #[test]
    fn test_extract_section_name() {
        let sections = ["parameters", "components/parameters"];
        assert_eq!(
            extract_section_name("#/parameters/Limit", &sections).as_deref(),
            Some("Limit")
        );
        assert_eq!(
            extract_section_name("#/components/parameters/Offset", &sections).as_deref(),
            Some("Offset")
        );
        assert!(extract_section_name("#/definitions/Limit", &sections).is_none());
        assert!(extract_section_name("other.yaml#/parameters/Limit", &sections).is_none());
    }
}
