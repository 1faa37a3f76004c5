//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Their serde attributes also define the JSON shape the
//! API returns, so secrets such as the password hash are skipped here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user about to be inserted. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A yoga session and its roster.
///
/// `participants` never holds the same user id twice. `version` is the
/// optimistic concurrency counter: a save only lands if the stored version
/// still equals the one that was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub id: Option<i64>,
    pub name: String,
    pub date: NaiveDate,
    pub teacher_id: i64,
    pub description: String,
    #[serde(rename = "users")]
    pub participants: Vec<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub version: i64,
}

impl Session {
    pub fn is_participating(&self, user_id: i64) -> bool {
        self.participants.contains(&user_id)
    }
}

/// Incoming session body for create and update.
///
/// Missing strings deserialize as empty so that they fail validation (400)
/// instead of failing JSON extraction.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SessionPayload {
    pub id: Option<i64>,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Name must be between 1-50 characters"))]
    pub name: String,

    #[validate(required(message = "Date is required"))]
    pub date: Option<NaiveDate>,

    #[validate(required(message = "Teacher is required"))]
    pub teacher_id: Option<i64>,

    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 2500,
        message = "Description must be between 1-2500 characters"
    ))]
    pub description: String,

    #[serde(default)]
    pub users: Vec<i64>,
}

impl SessionPayload {
    /// Builds an unsaved session, or `None` when a required field is missing.
    ///
    /// Duplicate user ids in the payload are collapsed, first occurrence wins.
    pub fn into_session(self) -> Option<Session> {
        let (Some(date), Some(teacher_id)) = (self.date, self.teacher_id) else {
            return None;
        };

        let mut participants = Vec::with_capacity(self.users.len());
        for user_id in self.users {
            if !participants.contains(&user_id) {
                participants.push(user_id);
            }
        }

        Some(Session {
            id: self.id,
            name: self.name,
            date,
            teacher_id,
            description: self.description,
            participants,
            created_at: None,
            updated_at: None,
            version: 0,
        })
    }
}
