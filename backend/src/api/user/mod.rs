//! Module for user account API endpoints.
//!
//! Lookup of a user by id and deletion of one's own account.

pub mod handlers;
pub mod routes;
