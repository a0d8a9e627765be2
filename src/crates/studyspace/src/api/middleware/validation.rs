//! Request validation utilities
//!
//! Validation helpers for ensuring request data meets requirements.

use crate::api::error::{ApiError, ApiResult};

/// Validate that a required string field is not empty
pub fn validate_not_empty(value: &str, field_name: &str) -> ApiResult<()> {
    if value.is_empty() {
        return Err(ApiError::ValidationError(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(())
}

/// Validate string length constraints
pub fn validate_string_length(
    value: &str,
    field_name: &str,
    min: usize,
    max: usize,
) -> ApiResult<()> {
    if value.len() < min || value.len() > max {
        return Err(ApiError::ValidationError(format!(
            "{} must be between {} and {} characters",
            field_name, min, max
        )));
    }
    Ok(())
}

/// Validate a minimum length (passwords)
pub fn validate_min_length(value: &str, field_name: &str, min: usize) -> ApiResult<()> {
    if value.len() < min {
        return Err(ApiError::ValidationError(format!(
            "{} must be at least {} characters",
            field_name, min
        )));
    }
    Ok(())
}
