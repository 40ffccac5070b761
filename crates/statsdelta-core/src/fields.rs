//! Output field selection.

use crate::errors::{DeltaError, Result};
use crate::model::Side;

/// Split a comma-separated `-output-fields` argument
///
/// No trimming or deduplication: `"a, b"` names the fields `a` and ` b`.
pub fn parse_field_list(arg: &str) -> Vec<String> {
    arg.split(',').map(str::to_string).collect()
}

/// Resolve the ordered list of output fields
///
/// Non-empty `explicit` fields are used verbatim. Otherwise every field of
/// `from_header` except the key field is used, compared by name. Every
/// resolved field must appear in both headers.
///
/// # Errors
///
/// `OutputFieldsMissing` naming the first side (from, then to) that lacks
/// fields, with all fields it lacks.
pub fn resolve_output_fields(
    explicit: &[String],
    from_header: &[String],
    to_header: &[String],
    key_field: &str,
) -> Result<Vec<String>> {
    let fields: Vec<String> = if explicit.is_empty() {
        from_header
            .iter()
            .filter(|name| name.as_str() != key_field)
            .cloned()
            .collect()
    } else {
        explicit.to_vec()
    };

    for (side, header) in [(Side::From, from_header), (Side::To, to_header)] {
        let missing = missing_fields(&fields, header);
        if !missing.is_empty() {
            return Err(DeltaError::OutputFieldsMissing {
                side,
                fields: missing,
            });
        }
    }

    Ok(fields)
}

fn missing_fields(fields: &[String], header: &[String]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for field in fields {
        if !header.contains(field) && !missing.contains(field) {
            missing.push(field.clone());
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_excludes_key_by_value() {
        let from = names(&["id", "a", "b"]);
        let to = names(&["b", "a", "id"]);
        // The key name arrives as a separately allocated string.
        let key_field = String::from("id");
        let fields = resolve_output_fields(&[], &from, &to, &key_field).unwrap();
        assert_eq!(fields, names(&["a", "b"]));
    }

    #[test]
    fn test_explicit_fields_kept_verbatim_with_duplicates() {
        let header = names(&["id", "a", "b"]);
        let fields =
            resolve_output_fields(&names(&["b", "a", "b"]), &header, &header, "id").unwrap();
        assert_eq!(fields, names(&["b", "a", "b"]));
    }

    #[test]
    fn test_explicit_key_field_is_allowed() {
        let header = names(&["id", "a"]);
        let fields = resolve_output_fields(&names(&["id"]), &header, &header, "id").unwrap();
        assert_eq!(fields, names(&["id"]));
    }

    #[test]
    fn test_missing_on_to_side_reported() {
        let from = names(&["id", "a", "b"]);
        let to = names(&["id", "a"]);
        let err = resolve_output_fields(&[], &from, &to, "id").unwrap_err();
        assert_eq!(
            err,
            DeltaError::OutputFieldsMissing {
                side: Side::To,
                fields: names(&["b"]),
            }
        );
    }

    #[test]
    fn test_missing_on_from_side_checked_first() {
        let from = names(&["id"]);
        let to = names(&["id"]);
        let err = resolve_output_fields(&names(&["x", "y", "x"]), &from, &to, "id").unwrap_err();
        assert_eq!(
            err,
            DeltaError::OutputFieldsMissing {
                side: Side::From,
                fields: names(&["x", "y"]),
            }
        );
    }

    #[test]
    fn test_empty_header_with_default_yields_no_fields() {
        let fields = resolve_output_fields(&[], &[], &names(&["id", "a"]), "id").unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_parse_field_list_does_not_trim() {
        assert_eq!(parse_field_list("a, b"), names(&["a", " b"]));
        assert_eq!(parse_field_list(""), names(&[""]));
        assert_eq!(parse_field_list("a,,a"), names(&["a", "", "a"]));
    }
}
