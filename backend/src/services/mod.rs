//! Module for core business logic services.
//!
//! Services validate input, enforce the business rules and orchestrate the
//! stores. They borrow their stores from `AppState` for the length of a
//! request.

pub mod session_service;
pub mod teacher_service;
pub mod user_service;
