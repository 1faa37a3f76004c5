//! Defines the HTTP routes specifically for authentication.
//!
//! Login and registration are the only routes reachable without a token.

use crate::auth::handlers::*;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}
