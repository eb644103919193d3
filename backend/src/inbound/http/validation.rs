//! Shared request parsing helpers for HTTP handlers.
//!
//! Request bodies use `Option` fields so a missing field surfaces as a
//! structured `invalid_request` naming the field, rather than a serde
//! deserialisation error.

use serde_json::json;

use crate::domain::Error;

/// Error for a required body field that was absent.
pub fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Unwrap a required body field or fail with [`missing_field_error`].
pub fn require_field<T>(value: Option<T>, field: &str) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn missing_field_names_the_field() {
        let err = missing_field_error("title");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        let details = err.details.as_ref().and_then(|d| d.as_object()).expect("details");
        assert_eq!(details.get("field").and_then(|v| v.as_str()), Some("title"));
    }

    #[test]
    fn require_field_passes_present_values_through() {
        assert_eq!(require_field(Some(5), "count").expect("present"), 5);
        assert!(require_field::<i32>(None, "count").is_err());
    }
}
