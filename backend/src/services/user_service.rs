//! User business logic service.
//!
//! Lookup and self-service deletion of user accounts. Account creation lives
//! in the auth service since it is part of sign-up.

use crate::auth::guard::authorize_self_service;
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::UserStore;
use tracing::{info, warn};

pub struct UserService<'a> {
    users: &'a dyn UserStore,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `users` - Credential store holding the user records
    pub fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    pub async fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    /// Deletes the account `id` on behalf of the authenticated principal.
    ///
    /// # Arguments
    /// * `principal_email` - Email of the caller, taken from a verified token
    /// * `id` - Account to delete
    ///
    /// # Errors
    /// - `NotFound` when the account does not exist
    /// - `Unauthorized` when the account belongs to someone else; nothing is
    ///   deleted in that case
    pub async fn delete_self(&self, principal_email: Option<&str>, id: i64) -> ServiceResult<()> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        if !authorize_self_service(principal_email, Some(&user.email)) {
            warn!("Refused deletion of user {} requested by another account", id);
            return Err(ServiceError::unauthorized(
                "You can only delete your own account",
            ));
        }

        self.users.delete_by_id(id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }
}
