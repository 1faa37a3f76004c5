//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse the login and sign-up bodies and hand them to
//! `auth::service`, which validates them before touching the stores.

use crate::api::common::{ApiError, service_error_to_http};
use crate::api::extract::ApiJson;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::state::AppState;
use axum::extract::{Json, State};

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<JwtResponse>, ApiError> {
    let auth_service = AuthService::new(
        state.users.as_ref(),
        state.password_encoder.as_ref(),
        state.jwt.as_ref(),
    );

    match auth_service.login(payload).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let auth_service = AuthService::new(
        state.users.as_ref(),
        state.password_encoder.as_ref(),
        state.jwt.as_ref(),
    );

    match auth_service.register(payload).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}
