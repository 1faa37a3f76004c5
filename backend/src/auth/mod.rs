//! Authentication module for accounts, bearer tokens and access control.
//!
//! This module provides login and registration, the JWT middleware guarding
//! every other route, and the owner-only access check.

pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
