//! Field limits, in characters.

use plannr_core::{DomainError, DomainResult};

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 1000;
pub const INSTRUCTIONS_MAX: usize = 5000;
pub const DURATION_MAX: usize = 50;
pub const AGE_MAX: usize = 255;
pub const LOCATION_MAX: usize = 255;
pub const IMAGE_MAX: usize = 255;
pub const PREP_TIME_MAX: usize = DURATION_MAX;
pub const COMMENT_BODY_MAX: usize = 1000;
pub const TAG_NAME_MAX: usize = 50;

/// Trim and check a required name.
pub fn name(kind: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&len) {
        return Err(DomainError::validation(format!(
            "{kind} name must be {NAME_MIN}-{NAME_MAX} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim and check required free text, e.g. a comment body.
pub fn required(field: &str, value: &str, max: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > max {
        return Err(DomainError::validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Check an optional text field against its maximum length.
pub fn optional(field: &str, value: Option<String>, max: usize) -> DomainResult<Option<String>> {
    match value {
        Some(v) if v.chars().count() > max => Err(DomainError::validation(format!(
            "{field} must be at most {max} characters"
        ))),
        other => Ok(other),
    }
}
