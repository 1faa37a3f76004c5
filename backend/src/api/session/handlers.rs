//! Handler functions for session API endpoints.

use crate::api::common::{ApiError, service_error_to_http};
use crate::api::extract::{ApiJson, ApiPath};
use crate::auth::models::Principal;
use crate::database::models::{Session, SessionPayload};
use crate::errors::ServiceError;
use crate::services::session_service::SessionService;
use crate::state::AppState;
use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};

fn session_service(state: &AppState) -> SessionService<'_> {
    SessionService::new(
        state.sessions.as_ref(),
        state.users.as_ref(),
        state.teachers.as_ref(),
    )
}

#[axum::debug_handler]
pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<Session>>, ApiError> {
    session_service(&state)
        .find_all()
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

#[axum::debug_handler]
pub async fn find_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Session>, ApiError> {
    match session_service(&state).get_by_id(id).await {
        Ok(Some(session)) => Ok(Json(session)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found("Session", id))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

#[axum::debug_handler]
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    ApiJson(payload): ApiJson<SessionPayload>,
) -> Result<Json<Session>, ApiError> {
    tracing::debug!("Session creation requested by {}", principal.email);

    session_service(&state)
        .create(payload)
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

#[axum::debug_handler]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<SessionPayload>,
) -> Result<Json<Session>, ApiError> {
    session_service(&state)
        .update(id, payload)
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

#[axum::debug_handler]
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    session_service(&state)
        .delete(id)
        .await
        .map(|_| StatusCode::OK)
        .map_err(service_error_to_http)
}

#[axum::debug_handler]
pub async fn participate(
    State(state): State<AppState>,
    ApiPath((id, user_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    session_service(&state)
        .participate(id, user_id)
        .await
        .map(|_| StatusCode::OK)
        .map_err(service_error_to_http)
}

#[axum::debug_handler]
pub async fn no_longer_participate(
    State(state): State<AppState>,
    ApiPath((id, user_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    session_service(&state)
        .no_longer_participate(id, user_id)
        .await
        .map(|_| StatusCode::OK)
        .map_err(service_error_to_http)
}
