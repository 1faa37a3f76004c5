//! Data structures for authentication-related entities.
//!
//! This module defines the login and sign-up payloads, the responses sent
//! back to the client, and the `Principal` an authenticated caller is
//! represented by inside the services.

use crate::database::models::User;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An authenticated identity, built from a stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Principal {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_admin: user.admin,
        }
    }
}

/// Login request payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Sign-up request payload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(
        email(message = "Email must be a valid address"),
        length(min = 1, max = 50, message = "Email must be at most 50 characters")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 3, max = 20, message = "First name must be between 3-20 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 3, max = 20, message = "Last name must be between 3-20 characters"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(length(min = 6, max = 40, message = "Password must be between 6-40 characters"))]
    pub password: String,
}

/// Login response containing the bearer token and user info
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl JwtResponse {
    pub fn bearer(token: String, principal: &Principal) -> Self {
        JwtResponse {
            token,
            token_type: "Bearer".to_string(),
            id: principal.id,
            username: principal.email.clone(),
            first_name: principal.first_name.clone(),
            last_name: principal.last_name.clone(),
            admin: principal.is_admin,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
