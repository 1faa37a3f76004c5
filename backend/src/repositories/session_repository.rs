//! Database repository for sessions and their participation rows.
//!
//! A session lives in `sessions`; its roster lives in `participate`, one row
//! per (session, user) with a `position` that keeps join order. The primary
//! key on (session_id, user_id) rejects duplicate participation even if two
//! writers race past the service-level check.

use crate::database::models::Session;
use crate::repositories::{SaveOutcome, SessionStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use std::collections::HashMap;

#[derive(Debug, FromRow)]
struct SessionRow {
    id: i64,
    name: String,
    description: String,
    date: NaiveDate,
    teacher_id: i64,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self, participants: Vec<i64>) -> Session {
        Session {
            id: Some(self.id),
            name: self.name,
            date: self.date,
            teacher_id: self.teacher_id,
            description: self.description,
            participants,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
            version: self.version,
        }
    }
}

const SESSION_COLUMNS: &str =
    "id, name, description, date, teacher_id, version, created_at, updated_at";

#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn participants_of(&self, session_id: i64) -> Result<Vec<i64>> {
        let users = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM participate WHERE session_id = ? ORDER BY position",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Replaces the roster of `session_id` inside an open transaction.
    async fn write_participants(
        tx: &mut Transaction<'_, Sqlite>,
        session_id: i64,
        participants: &[i64],
    ) -> Result<()> {
        sqlx::query("DELETE FROM participate WHERE session_id = ?")
            .bind(session_id)
            .execute(&mut **tx)
            .await?;

        for (position, user_id) in participants.iter().enumerate() {
            sqlx::query("INSERT INTO participate (session_id, user_id, position) VALUES (?, ?, ?)")
                .bind(session_id)
                .bind(*user_id)
                .bind(position as i64)
                .execute(&mut **tx)
                .await
                .with_context(|| {
                    format!("failed to add user {} to session {}", user_id, session_id)
                })?;
        }

        Ok(())
    }

    async fn load(&self, id: i64) -> Result<Session> {
        self.find_by_id(id)
            .await?
            .with_context(|| format!("session {} vanished after write", id))
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {} FROM sessions WHERE id = ?",
            SESSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let participants = self.participants_of(row.id).await?;
                Ok(Some(row.into_session(participants)))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Session>> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {} FROM sessions ORDER BY id",
            SESSION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let links = sqlx::query_as::<_, (i64, i64)>(
            "SELECT session_id, user_id FROM participate ORDER BY session_id, position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut rosters: HashMap<i64, Vec<i64>> = HashMap::new();
        for (session_id, user_id) in links {
            rosters.entry(session_id).or_default().push(user_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let participants = rosters.remove(&row.id).unwrap_or_default();
                row.into_session(participants)
            })
            .collect())
    }

    async fn insert(&self, session: &Session) -> Result<Session> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO sessions (name, description, date, teacher_id)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&session.name)
        .bind(&session.description)
        .bind(session.date)
        .bind(session.teacher_id)
        .fetch_one(&mut *tx)
        .await
        .context("failed to insert session")?;

        Self::write_participants(&mut tx, id, &session.participants).await?;
        tx.commit().await?;

        self.load(id).await
    }

    async fn save(&self, session: &Session) -> Result<SaveOutcome> {
        let Some(id) = session.id else {
            anyhow::bail!("cannot save a session that has no id");
        };

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET name = ?, description = ?, date = ?, teacher_id = ?,
                version = version + 1, updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&session.name)
        .bind(&session.description)
        .bind(session.date)
        .bind(session.teacher_id)
        .bind(id)
        .bind(session.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(SaveOutcome::Conflict);
        }

        Self::write_participants(&mut tx, id, &session.participants).await?;
        tx.commit().await?;

        Ok(SaveOutcome::Saved(self.load(id).await?))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;
    use crate::database::test_pool;
    use crate::repositories::{InsertOutcome, UserStore};
    use crate::repositories::user_repository::UserRepository;

    fn draft(name: &str) -> Session {
        Session {
            id: None,
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            teacher_id: 1,
            description: "Relaxing session".to_string(),
            participants: vec![],
            created_at: None,
            updated_at: None,
            version: 0,
        }
    }

    async fn seed_users(pool: &SqlitePool, count: usize) -> Vec<i64> {
        let users = UserRepository::new(pool.clone());
        let mut ids = Vec::new();
        for n in 0..count {
            let outcome = users
                .insert(NewUser {
                    email: format!("user{}@example.com", n),
                    first_name: "Test".to_string(),
                    last_name: "User".to_string(),
                    password_hash: "$2b$04$hash".to_string(),
                    admin: false,
                })
                .await
                .unwrap();
            match outcome {
                InsertOutcome::Inserted(user) => ids.push(user.id),
                InsertOutcome::Duplicate => panic!("seed emails are unique"),
            }
        }
        ids
    }

    #[tokio::test]
    async fn test_insert_and_find_keeps_roster_order() {
        let pool = test_pool().await;
        let users = seed_users(&pool, 3).await;
        let repo = SessionRepository::new(pool);

        let mut session = draft("Morning Yoga");
        session.participants = vec![users[2], users[0], users[1]];
        let created = repo.insert(&session).await.unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.version, 0);
        assert_eq!(created.participants, vec![users[2], users[0], users[1]]);

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_save_bumps_version_and_rejects_stale_writes() {
        let pool = test_pool().await;
        let users = seed_users(&pool, 2).await;
        let repo = SessionRepository::new(pool);
        let created = repo.insert(&draft("Morning Yoga")).await.unwrap();

        let mut first = created.clone();
        first.participants.push(users[0]);
        let saved = match repo.save(&first).await.unwrap() {
            SaveOutcome::Saved(saved) => saved,
            SaveOutcome::Conflict => panic!("first write must land"),
        };
        assert_eq!(saved.version, 1);
        assert_eq!(saved.participants, vec![users[0]]);

        // Same read version as `first`, so it lost the race.
        let mut stale = created.clone();
        stale.participants.push(users[1]);
        assert_eq!(repo.save(&stale).await.unwrap(), SaveOutcome::Conflict);

        let stored = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.participants, vec![users[0]]);
    }

    #[tokio::test]
    async fn test_save_of_missing_session_is_conflict() {
        let repo = SessionRepository::new(test_pool().await);
        let mut ghost = draft("Ghost");
        ghost.id = Some(404);
        assert_eq!(repo.save(&ghost).await.unwrap(), SaveOutcome::Conflict);
    }

    #[tokio::test]
    async fn test_delete_removes_session_and_roster() {
        let pool = test_pool().await;
        let users = seed_users(&pool, 1).await;
        let repo = SessionRepository::new(pool.clone());

        let mut session = draft("Evening Yoga");
        session.participants = vec![users[0]];
        let created = repo.insert(&session).await.unwrap();
        let id = created.id.unwrap();

        repo.delete_by_id(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM participate")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
