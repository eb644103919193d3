//! Field validation shared by catalog entities.

/// Upper bound applied to names and titles, matching the column width.
pub const MAX_TEXT_FIELD_LEN: usize = 255;

/// Validation errors emitted by catalog entity constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    /// The field is empty once surrounding whitespace is removed.
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The field exceeds the persisted column width.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// A monetary amount below zero.
    #[error("{field} must not be negative")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
    },
}

impl CatalogValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::Negative { field } => field,
        }
    }
}

/// Trim `value` and enforce the non-empty and length bounds.
pub fn validate_text(
    value: impl Into<String>,
    field: &'static str,
) -> Result<String, CatalogValidationError> {
    let trimmed = value.into().trim().to_owned();
    if trimmed.is_empty() {
        return Err(CatalogValidationError::Empty { field });
    }
    if trimmed.chars().count() > MAX_TEXT_FIELD_LEN {
        return Err(CatalogValidationError::TooLong {
            field,
            max: MAX_TEXT_FIELD_LEN,
        });
    }
    Ok(trimmed)
}

/// Trim `value` and enforce only that it is non-empty.
///
/// Descriptions and question bodies are unbounded text columns.
pub fn validate_body(
    value: impl Into<String>,
    field: &'static str,
) -> Result<String, CatalogValidationError> {
    let trimmed = value.into().trim().to_owned();
    if trimmed.is_empty() {
        return Err(CatalogValidationError::Empty { field });
    }
    Ok(trimmed)
}
