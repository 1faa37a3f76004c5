//! Session business logic service.
//!
//! Owns the session roster: who participates in which session. Every roster
//! change is a read-check-write against the session store, and the write only
//! lands if nobody else wrote the session in between. On a lost race the
//! session is re-read and the checks run again.

use crate::database::models::{Session, SessionPayload};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::{SaveOutcome, SessionStore, TeacherStore, UserStore};
use crate::utils::validate_payload;
use tracing::{debug, info, warn};

/// How many times a versioned write is attempted before giving up.
pub const MAX_WRITE_ATTEMPTS: usize = 3;

pub struct SessionService<'a> {
    sessions: &'a dyn SessionStore,
    users: &'a dyn UserStore,
    teachers: &'a dyn TeacherStore,
}

impl<'a> SessionService<'a> {
    pub fn new(
        sessions: &'a dyn SessionStore,
        users: &'a dyn UserStore,
        teachers: &'a dyn TeacherStore,
    ) -> Self {
        Self {
            sessions,
            users,
            teachers,
        }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<Session>> {
        Ok(self.sessions.find_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<Session>> {
        Ok(self.sessions.find_by_id(id).await?)
    }

    /// Creates a session from a validated payload.
    ///
    /// # Errors
    /// - `Validation` when the payload breaks a field constraint
    /// - `NotFound` when the teacher or a listed user does not exist
    pub async fn create(&self, payload: SessionPayload) -> ServiceResult<Session> {
        let session = self.checked_session(payload).await?;

        let created = self.sessions.insert(&session).await?;
        info!(
            "Created session {:?} '{}' with {} participants",
            created.id,
            created.name,
            created.participants.len()
        );
        Ok(created)
    }

    /// Replaces the session stored under `id`. The path id wins over any id
    /// carried by the payload.
    pub async fn update(&self, id: i64, payload: SessionPayload) -> ServiceResult<Session> {
        let mut session = self.checked_session(payload).await?;
        session.id = Some(id);

        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let current = self.load(id).await?;
            session.version = current.version;

            match self.sessions.save(&session).await? {
                SaveOutcome::Saved(saved) => {
                    info!("Updated session {}", id);
                    return Ok(saved);
                }
                SaveOutcome::Conflict => {
                    debug!("Session {} changed during update (attempt {})", id, attempt);
                }
            }
        }

        warn!("Giving up on update of session {} after {} attempts", id, MAX_WRITE_ATTEMPTS);
        Err(ServiceError::concurrent_modification("Session", id))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.load(id).await?;
        self.sessions.delete_by_id(id).await?;
        info!("Deleted session {}", id);
        Ok(())
    }

    /// Adds `user_id` to the roster of `session_id`.
    ///
    /// # Errors
    /// - `NotFound` for a missing session, then for a missing user
    /// - `BadRequest` when the user already participates
    /// - `ConcurrentModification` when every write attempt lost a race
    ///
    /// Nothing is persisted on any error path.
    pub async fn participate(&self, session_id: i64, user_id: i64) -> ServiceResult<Session> {
        let session = self.load(session_id).await?;

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User", user_id));
        }

        let saved = self
            .save_roster(session, |session| {
                if session.is_participating(user_id) {
                    return Err(ServiceError::bad_request(format!(
                        "User {} is already participating in session {}",
                        user_id, session_id
                    )));
                }
                session.participants.push(user_id);
                Ok(())
            })
            .await?;

        info!("User {} joined session {}", user_id, session_id);
        Ok(saved)
    }

    /// Removes `user_id` from the roster of `session_id`, keeping the order
    /// of the remaining participants.
    ///
    /// # Errors
    /// - `NotFound` for a missing session
    /// - `BadRequest` when the user does not participate
    /// - `ConcurrentModification` when every write attempt lost a race
    pub async fn no_longer_participate(
        &self,
        session_id: i64,
        user_id: i64,
    ) -> ServiceResult<Session> {
        let session = self.load(session_id).await?;

        let saved = self
            .save_roster(session, |session| {
                let Some(index) = session.participants.iter().position(|id| *id == user_id)
                else {
                    return Err(ServiceError::bad_request(format!(
                        "User {} is not participating in session {}",
                        user_id, session_id
                    )));
                };
                session.participants.remove(index);
                Ok(())
            })
            .await?;

        info!("User {} left session {}", user_id, session_id);
        Ok(saved)
    }

    async fn load(&self, id: i64) -> ServiceResult<Session> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", id))
    }

    /// Applies `edit` to the session and saves it, re-reading and re-applying
    /// on a version conflict. `edit` rejects by returning an error, in which
    /// case nothing is written.
    async fn save_roster<F>(&self, mut session: Session, mut edit: F) -> ServiceResult<Session>
    where
        F: FnMut(&mut Session) -> ServiceResult<()> + Send,
    {
        let Some(id) = session.id else {
            return Err(ServiceError::internal_error("Stored session has no id"));
        };

        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            if attempt > 1 {
                session = self.load(id).await?;
            }

            edit(&mut session)?;

            match self.sessions.save(&session).await? {
                SaveOutcome::Saved(saved) => return Ok(saved),
                SaveOutcome::Conflict => {
                    debug!("Session {} roster changed concurrently (attempt {})", id, attempt);
                }
            }
        }

        warn!("Giving up on roster change of session {} after {} attempts", id, MAX_WRITE_ATTEMPTS);
        Err(ServiceError::concurrent_modification("Session", id))
    }

    /// Validates the payload and checks that everything it references exists.
    async fn checked_session(&self, payload: SessionPayload) -> ServiceResult<Session> {
        validate_payload(&payload)?;

        let session = payload
            .into_session()
            .ok_or_else(|| ServiceError::internal_error("Validated session payload is incomplete"))?;

        if self.teachers.find_by_id(session.teacher_id).await?.is_none() {
            return Err(ServiceError::not_found("Teacher", session.teacher_id));
        }

        for user_id in &session.participants {
            if self.users.find_by_id(*user_id).await?.is_none() {
                return Err(ServiceError::not_found("User", user_id));
            }
        }

        Ok(session)
    }
}
