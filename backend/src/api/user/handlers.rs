//! Handler functions for user API endpoints.
//!
//! The caller's identity is the `Principal` resolved by the JWT middleware,
//! never the request body or path.

use crate::api::common::{ApiError, service_error_to_http};
use crate::api::extract::ApiPath;
use crate::auth::models::Principal;
use crate::database::models::User;
use crate::errors::ServiceError;
use crate::services::user_service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};

/// Retrieves a user by its ID.
#[axum::debug_handler]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<User>, ApiError> {
    match UserService::new(state.users.as_ref()).find_by_id(id).await {
        Ok(Some(user)) => Ok(Json(user)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found("User", id))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Deletes the caller's own account.
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    tracing::info!("Deletion of user {} requested", id);

    UserService::new(state.users.as_ref())
        .delete_self(Some(principal.email.as_str()), id)
        .await
        .map(|_| StatusCode::OK)
        .map_err(service_error_to_http)
}
