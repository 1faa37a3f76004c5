//! One-way password hashing.
//!
//! Services only see the `PasswordEncoder` trait, so the hashing scheme can be
//! swapped (or made cheap in tests) without touching authentication logic.

use crate::errors::{ServiceError, ServiceResult};
use bcrypt::{hash, verify};
use std::sync::OnceLock;

const DUMMY_PASSWORD: &str = "dummy-password-never-stored";

pub trait PasswordEncoder: Send + Sync {
    /// Hash a plain text password before storing it
    fn encode(&self, password: &str) -> ServiceResult<String>;

    /// Check a plain text password against a stored hash
    fn matches(&self, password: &str, hash: &str) -> ServiceResult<bool>;

    /// Spend the same work as `matches` when there is no stored hash to
    /// check against, e.g. for an unknown email.
    fn verify_dummy(&self, password: &str) -> ServiceResult<()>;
}

/// bcrypt with a configurable cost
#[derive(Debug, Clone)]
pub struct BcryptPasswordEncoder {
    cost: u32,
    dummy_hash: OnceLock<String>,
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Hash of a fixed password at this encoder's cost, computed once.
    fn dummy_hash(&self) -> ServiceResult<&str> {
        if let Some(hashed) = self.dummy_hash.get() {
            return Ok(hashed);
        }
        let hashed = self.encode(DUMMY_PASSWORD)?;
        Ok(self.dummy_hash.get_or_init(|| hashed))
    }
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordEncoder for BcryptPasswordEncoder {
    fn encode(&self, password: &str) -> ServiceResult<String> {
        hash(password, self.cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    fn matches(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        match verify(password, hash) {
            Ok(valid) => Ok(valid),
            // A stored value that is not a bcrypt hash can never match.
            Err(bcrypt::BcryptError::InvalidHash(_)) => Ok(false),
            Err(e) => Err(ServiceError::internal_error(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }

    fn verify_dummy(&self, password: &str) -> ServiceResult<()> {
        let dummy = self.dummy_hash()?;
        self.matches(password, dummy).map(|_| ())
    }
}
