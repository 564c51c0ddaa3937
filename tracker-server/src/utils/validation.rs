//! Input validation helpers
//!
//! The bridge from derive-based `validator` failures to the structured
//! field-error list the API returns as 400.

use validator::{Validate, ValidationErrors};

use crate::utils::{AppError, FieldError};

/// Run derive-based validation on a request payload.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(into_field_errors)
}

/// Flatten `validator` output into a deterministic field-error list.
fn into_field_errors(errors: ValidationErrors) -> AppError {
    let mut fields = Vec::new();
    for (field, failures) in errors.field_errors() {
        for failure in failures {
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            fields.push(FieldError {
                field: field.to_string(),
                message,
            });
        }
    }
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    AppError::Validation(fields)
}
