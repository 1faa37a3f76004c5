//! Shared application state handed to every handler and middleware.

use crate::config::Config;
use crate::database::Database;
use crate::repositories::session_repository::SessionRepository;
use crate::repositories::teacher_repository::TeacherRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::{SessionStore, TeacherStore, UserStore};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::{BcryptPasswordEncoder, PasswordEncoder};
use std::sync::Arc;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// Credential store
    pub users: Arc<dyn UserStore>,
    pub teachers: Arc<dyn TeacherStore>,
    pub sessions: Arc<dyn SessionStore>,
    /// Token codec configured with the shared secret
    pub jwt: Arc<JwtUtils>,
    pub password_encoder: Arc<dyn PasswordEncoder>,
}

impl AppState {
    /// Wires the SQLite repositories and the configured token codec together.
    pub fn new(database: &Database, config: &Config) -> Self {
        let pool = database.pool().clone();

        AppState {
            users: Arc::new(UserRepository::new(pool.clone())),
            teachers: Arc::new(TeacherRepository::new(pool.clone())),
            sessions: Arc::new(SessionRepository::new(pool)),
            jwt: Arc::new(JwtUtils::from_config(config)),
            password_encoder: Arc::new(BcryptPasswordEncoder::new(config.bcrypt_cost)),
        }
    }
}
