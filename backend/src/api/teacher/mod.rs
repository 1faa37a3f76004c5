//! Module for teacher API endpoints. Read-only.

pub mod handlers;
pub mod routes;
