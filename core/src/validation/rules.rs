//! Custom validation rules used by `#[validate(custom(...))]` attributes.

use validator::ValidationError;

/// Longest accepted leave reason or decision note.
pub const MAX_REASON_LENGTH: u64 = 500;

/// Order in which failing fields are reported when a payload has several.
pub const FIELD_ORDER: &[&str] = &["reason", "note", "name", "email", "phone"];

/// Rejects empty and whitespace-only text.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Validates `NNN-NNNN-NNNN` phone shape.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let groups: Vec<&str> = phone.split('-').collect();
    let shape_ok = groups.len() == 3
        && groups
            .iter()
            .zip([3usize, 4, 4])
            .all(|(group, len)| group.len() == len && group.bytes().all(|b| b.is_ascii_digit()));
    if !shape_ok {
        return Err(ValidationError::new("phone_invalid_format"));
    }
    Ok(())
}
