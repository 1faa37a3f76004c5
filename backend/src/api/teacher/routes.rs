//! Defines the HTTP routes for teachers.

use super::handlers::{find_all, find_by_id};
use crate::auth::middleware::jwt_auth;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

pub fn teacher_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(find_all))
        .route("/{id}", get(find_by_id))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth))
}
