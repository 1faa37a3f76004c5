//! Defines the HTTP routes for sessions and session participation.

use super::handlers::{
    create, delete, find_all, find_by_id, no_longer_participate, participate, update,
};
use crate::auth::middleware::jwt_auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn session_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(find_all).post(create))
        .route("/{id}", get(find_by_id).put(update).delete(delete))
        .route(
            "/{id}/participate/{user_id}",
            post(participate).delete(no_longer_participate),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth))
}
