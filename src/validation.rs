use crate::error::{ContactError, ContactResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ContactResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ContactError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Keeps a value exactly as given unless it is blank.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
