use crate::error::{TouchError, TouchResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> TouchResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(TouchError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that a period is a finite number greater than zero.
pub fn positive(value: f64, field: &str) -> TouchResult<f64> {
    if !value.is_finite() {
        return Err(TouchError::NotANumber {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    if value <= 0.0 {
        Err(TouchError::NonPositive {
            field: field.to_string(),
        })
    } else {
        Ok(value)
    }
}

/// Coerces a numeric string (as typed into a form) into a number.
/// Surrounding whitespace is ignored; blank input is a `BlankField` error.
pub fn number(value: &str, field: &str) -> TouchResult<f64> {
    let trimmed = non_blank(value, field)?;
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(TouchError::NotANumber {
            field: field.to_string(),
            value: trimmed,
        }),
    }
}

/// Parses a period typed as text and checks it is positive.
pub fn period(value: &str) -> TouchResult<f64> {
    positive(number(value, "period")?, "period")
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
