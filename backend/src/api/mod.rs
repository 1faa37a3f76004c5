//! Central module for organizing the application's API endpoints.
//!
//! Each domain (sessions, teachers, users) owns its handlers and routes;
//! `app_router` nests them together with the authentication routes.

pub mod common;
pub mod extract;
pub mod session;
pub mod teacher;
pub mod user;

use crate::auth::routes::auth_router;
use crate::state::AppState;
use axum::Router;

/// Builds the full API router. Everything outside `/api/auth` requires a
/// bearer token.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth_router())
        .nest(
            "/api/session",
            session::routes::session_router(state.clone()),
        )
        .nest(
            "/api/teacher",
            teacher::routes::teacher_router(state.clone()),
        )
        .nest("/api/user", user::routes::user_router(state.clone()))
        .with_state(state)
}
