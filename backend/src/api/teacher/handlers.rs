//! Handler functions for teacher API endpoints.

use crate::api::common::{ApiError, service_error_to_http};
use crate::api::extract::ApiPath;
use crate::database::models::Teacher;
use crate::errors::ServiceError;
use crate::services::teacher_service::TeacherService;
use crate::state::AppState;
use axum::extract::{Json, State};

#[axum::debug_handler]
pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, ApiError> {
    TeacherService::new(state.teachers.as_ref())
        .find_all()
        .await
        .map(Json)
        .map_err(service_error_to_http)
}

#[axum::debug_handler]
pub async fn find_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Teacher>, ApiError> {
    match TeacherService::new(state.teachers.as_ref()).find_by_id(id).await {
        Ok(Some(teacher)) => Ok(Json(teacher)),
        Ok(None) => Err(service_error_to_http(ServiceError::not_found("Teacher", id))),
        Err(error) => Err(service_error_to_http(error)),
    }
}
