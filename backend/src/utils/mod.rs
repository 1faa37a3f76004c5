//! Collection of general utility functions.
//!
//! Token handling, password hashing and request validation helpers shared by
//! the auth and API modules.

use crate::errors::{FieldError, ServiceError, ServiceResult};
use validator::{Validate, ValidationErrors};

pub mod jwt;
pub mod password;

/// Runs the derive-based validation of a request body.
///
/// Returns every violation at once as a `ServiceError::Validation` rather than
/// stopping at the first one.
pub fn validate_payload<T: Validate>(payload: &T) -> ServiceResult<()> {
    payload.validate().map_err(|errors| {
        let details = validation_errors_to_field_errors(&errors);
        let message = details
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join(", ");
        ServiceError::validation(message, details)
    })
}

/// Formats validator::ValidationErrors into field-specific error details
pub fn validation_errors_to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
        })
        .collect();
    // field_errors() is backed by a HashMap.
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}
