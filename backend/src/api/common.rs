//! Error handling utilities for API responses.
//!
//! Provides the structured error body and the single conversion from
//! service-layer errors to HTTP responses.
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//! - `error.details`: Optional field-specific validation errors
//!
//! # Error Handling Flow
//! 1. Service layer returns domain-specific `ServiceError`
//! 2. `service_error_to_http` converts to appropriate HTTP response
//! 3. Validation errors are automatically formatted with field details

use crate::errors::{FieldError, ServiceError};
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Request timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// What a handler returns when a request fails
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Maps a service error to its status code and JSON error body.
///
/// Authentication failures all read the same to the client; the token
/// rejection kind only reaches the logs.
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    let (status, error_type, message, details) = match error {
        ServiceError::Validation { message, details } => (
            StatusCode::BAD_REQUEST,
            "validation_error",
            message,
            Some(details),
        ),
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} '{}' not found", entity, identifier),
            None,
        ),
        ServiceError::BadRequest { message } => {
            (StatusCode::BAD_REQUEST, "bad_request", message, None)
        }
        ServiceError::AlreadyExists { message, .. } => {
            (StatusCode::BAD_REQUEST, "already_exists", message, None)
        }
        ServiceError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Bad credentials".to_string(),
            None,
        ),
        ServiceError::Unauthorized { message } => {
            (StatusCode::UNAUTHORIZED, "unauthorized", message, None)
        }
        ServiceError::Token(kind) => {
            tracing::debug!("Token rejected: {}", kind);
            (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Full authentication is required to access this resource".to_string(),
                None,
            )
        }
        ServiceError::ConcurrentModification { entity, identifier } => (
            StatusCode::CONFLICT,
            "concurrent_modification",
            format!("{} '{}' was modified concurrently, retry", entity, identifier),
            None,
        ),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                "Internal server error".to_string(),
                None,
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
                None,
            )
        }
    };

    (
        status,
        Json(ApiResponse::<()>::error(message, error_type, details)),
    )
}
