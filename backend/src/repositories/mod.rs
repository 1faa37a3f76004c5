//! Persistence interfaces and their SQLite implementations.
//!
//! Services depend on the store traits only; `AppState` wires in the sqlx
//! repositories, and tests wire in the in-memory stores.

use crate::database::models::{NewUser, Session, Teacher, User};
use anyhow::Result;
use async_trait::async_trait;

pub mod session_repository;
pub mod teacher_repository;
pub mod user_repository;

#[cfg(test)]
pub mod in_memory;

/// Result of a versioned session write.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The write landed; carries the session as stored.
    Saved(Session),
    /// The stored version no longer matches (or the row is gone).
    Conflict,
}

/// Result of inserting a user.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted(User),
    /// Another account already holds this email.
    Duplicate,
}

/// Credential store: user records keyed by email.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    /// Inserts a user. The email uniqueness is enforced by the store itself,
    /// so a racing sign-up is reported as `Duplicate` rather than an error.
    async fn insert(&self, user: NewUser) -> Result<InsertOutcome>;

    async fn delete_by_id(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait TeacherStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>>;

    async fn find_all(&self) -> Result<Vec<Teacher>>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>>;

    async fn find_all(&self) -> Result<Vec<Session>>;

    /// Inserts a new session, ignoring any id and version it carries.
    async fn insert(&self, session: &Session) -> Result<Session>;

    /// Writes `session` over the stored row if the stored version equals
    /// `session.version`, bumping the version by one.
    async fn save(&self, session: &Session) -> Result<SaveOutcome>;

    async fn delete_by_id(&self, id: i64) -> Result<()>;
}
