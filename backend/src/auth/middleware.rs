//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer token of each request, resolves its subject against
//! the credential store, and hands the resulting `Principal` to the handlers
//! through the request extensions.

use crate::api::common::{ApiError, service_error_to_http};
use crate::auth::models::Principal;
use crate::errors::{ServiceError, TokenError};
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// JWT authentication middleware
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Header borrows end before any await.
    let claims = {
        // Extract Authorization header
        let Some(auth_header) = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
        else {
            debug!("Rejected request without Authorization header");
            return Err(service_error_to_http(ServiceError::unauthorized(
                "Missing bearer token",
            )));
        };

        // Check if it's a Bearer token
        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            debug!("Rejected request with a non-bearer Authorization header");
            return Err(service_error_to_http(TokenError::Malformed.into()));
        };

        match state.jwt.verify_claims(token) {
            Ok(claims) => claims,
            Err(kind) => {
                // Unverified, only good for the log line.
                let subject = state.jwt.extract_subject(token).unwrap_or_default();
                debug!("Rejected bearer token ({}) claiming '{}'", kind, subject);
                return Err(service_error_to_http(kind.into()));
            }
        }
    };

    // The account may have been deleted since the token was issued.
    let user = match state.users.find_by_email(claims.email()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("Rejected bearer token for an account that no longer exists");
            return Err(service_error_to_http(ServiceError::unauthorized(
                "Account no longer exists",
            )));
        }
        Err(e) => return Err(service_error_to_http(e.into())),
    };

    // Add the principal to request extensions for use in handlers
    request.extensions_mut().insert(Principal::from(&user));
    Ok(next.run(request).await)
}
