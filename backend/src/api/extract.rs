//! Request extractors whose failures use the standard error body.
//!
//! axum's own `Path` and `Json` reject with a plain-text body and, for JSON,
//! a 422. These wrappers turn every parse failure into a 400 `BadRequest`
//! rendered by `service_error_to_http`.

use crate::api::common::service_error_to_http;
use crate::errors::ServiceError;
use axum::{
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};

/// Path parameters, e.g. `ApiPath(id): ApiPath<i64>`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServiceError))]
pub struct ApiPath<T>(pub T);

/// JSON request body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServiceError))]
pub struct ApiJson<T>(pub T);

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameters: {}", rejection.body_text());
        ServiceError::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ServiceError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        service_error_to_http(self).into_response()
    }
}
