//! Global application error types.
//!
//! This module defines the error types shared by the services and the HTTP
//! layer. Services raise a `ServiceError` at the boundary where a condition is
//! detected; handlers convert it once into an HTTP response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a presented bearer token is rejected.
///
/// Callers only ever see "unauthorized"; the kind is kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token does not parse into header, payload and signature.
    #[error("malformed token")]
    Malformed,
    /// The MAC does not match or the algorithm is not the configured one.
    #[error("bad token signature")]
    BadSignature,
    /// The token is past its expiry.
    #[error("token expired")]
    Expired,
}

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("{message}")]
    AlreadyExists {
        entity: String,
        identifier: String,
        message: String,
    },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    #[error("{entity} {identifier} was modified concurrently")]
    ConcurrentModification { entity: String, identifier: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn already_exists(
        entity: impl Into<String>,
        identifier: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn concurrent_modification(entity: impl Into<String>, identifier: impl ToString) -> Self {
        Self::ConcurrentModification {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
