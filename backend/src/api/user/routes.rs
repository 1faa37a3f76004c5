//! Defines the HTTP routes for user accounts.

use super::handlers::{delete_user, get_user_by_id};
use crate::auth::middleware::jwt_auth;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

pub fn user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_user_by_id).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth))
}
