//! In-memory stores for tests. They count writes so tests can assert how
//! often persistence was reached, and can inject version conflicts.

use super::{InsertOutcome, SaveOutcome, SessionStore, TeacherStore, UserStore};
use crate::database::models::{NewUser, Session, Teacher, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<BTreeMap<i64, User>>,
    inserts: AtomicUsize,
    deletes: AtomicUsize,
    stale_existence_check: AtomicBool,
}

impl InMemoryUserStore {
    /// Adds a user directly, bypassing the write counters.
    pub fn with_user(self, id: i64, email: &str, password_hash: &str, admin: bool) -> Self {
        let now = Utc::now();
        self.users.lock().unwrap().insert(
            id,
            User {
                id,
                email: email.to_string(),
                last_name: "Doe".to_string(),
                first_name: "John".to_string(),
                password: password_hash.to_string(),
                admin,
                created_at: now,
                updated_at: now,
            },
        );
        self
    }

    /// `exists_by_email` always answers false, as if another sign-up for the
    /// same email committed between the check and the insert.
    pub fn with_stale_existence_check(self) -> Self {
        self.stale_existence_check.store(true, Ordering::SeqCst);
        self
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        if self.stale_existence_check.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn insert(&self, user: NewUser) -> Result<InsertOutcome> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            return Ok(InsertOutcome::Duplicate);
        }
        let id = users.keys().next_back().copied().unwrap_or(0) + 1;
        let now = Utc::now();
        let user = User {
            id,
            email: user.email,
            last_name: user.last_name,
            first_name: user.first_name,
            password: user.password_hash,
            admin: user.admin,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, user.clone());
        Ok(InsertOutcome::Inserted(user))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.users.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTeacherStore {
    teachers: Mutex<BTreeMap<i64, Teacher>>,
}

impl InMemoryTeacherStore {
    pub fn with_teacher(self, id: i64, first_name: &str, last_name: &str) -> Self {
        let now = Utc::now();
        self.teachers.lock().unwrap().insert(
            id,
            Teacher {
                id,
                last_name: last_name.to_string(),
                first_name: first_name.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        self
    }
}

#[async_trait]
impl TeacherStore for InMemoryTeacherStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        Ok(self.teachers.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Teacher>> {
        Ok(self.teachers.lock().unwrap().values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<BTreeMap<i64, Session>>,
    saves: AtomicUsize,
    inserts: AtomicUsize,
    deletes: AtomicUsize,
    pending_conflicts: AtomicUsize,
}

impl InMemorySessionStore {
    /// Adds a stored session directly, bypassing the write counters.
    pub fn with_session(self, id: i64, participants: Vec<i64>) -> Self {
        let now = Utc::now();
        self.sessions.lock().unwrap().insert(
            id,
            Session {
                id: Some(id),
                name: format!("Session {}", id),
                date: now.date_naive(),
                teacher_id: 1,
                description: "Yoga session".to_string(),
                participants,
                created_at: Some(now),
                updated_at: Some(now),
                version: 0,
            },
        );
        self
    }

    /// The next `count` saves report a conflict instead of writing, as if
    /// another request had written first.
    pub fn with_conflicts(self, count: usize) -> Self {
        self.pending_conflicts.store(count, Ordering::SeqCst);
        self
    }

    pub fn get(&self, id: i64) -> Option<Session> {
        self.sessions.lock().unwrap().get(&id).cloned()
    }

    /// Completed saves plus conflicted attempts.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Session>> {
        Ok(self.get(id))
    }

    async fn find_all(&self) -> Result<Vec<Session>> {
        Ok(self.sessions.lock().unwrap().values().cloned().collect())
    }

    async fn insert(&self, session: &Session) -> Result<Session> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut sessions = self.sessions.lock().unwrap();
        let id = sessions.keys().next_back().copied().unwrap_or(0) + 1;
        let now = Utc::now();
        let stored = Session {
            id: Some(id),
            created_at: Some(now),
            updated_at: Some(now),
            version: 0,
            ..session.clone()
        };
        sessions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save(&self, session: &Session) -> Result<SaveOutcome> {
        self.saves.fetch_add(1, Ordering::SeqCst);

        let injected = self
            .pending_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        let mut sessions = self.sessions.lock().unwrap();
        let Some(id) = session.id else {
            anyhow::bail!("cannot save a session that has no id");
        };
        let Some(current) = sessions.get_mut(&id) else {
            return Ok(SaveOutcome::Conflict);
        };
        if injected {
            // Simulate a concurrent writer landing first.
            current.version += 1;
            return Ok(SaveOutcome::Conflict);
        }
        if current.version != session.version {
            return Ok(SaveOutcome::Conflict);
        }

        *current = Session {
            version: session.version + 1,
            created_at: current.created_at,
            updated_at: Some(Utc::now()),
            ..session.clone()
        };
        Ok(SaveOutcome::Saved(current.clone()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.sessions.lock().unwrap().remove(&id);
        Ok(())
    }
}
