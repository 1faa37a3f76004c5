//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::database::models::NewUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::{InsertOutcome, UserStore};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::PasswordEncoder;
use crate::utils::validate_payload;
use tracing::{info, warn};

pub const EMAIL_TAKEN_MESSAGE: &str = "Error: Email is already taken!";
pub const REGISTERED_MESSAGE: &str = "User registered successfully!";

/// Authentication service for handling login, token generation, and sign-up
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    password_encoder: &'a dyn PasswordEncoder,
    jwt_utils: &'a JwtUtils,
}

impl<'a> AuthService<'a> {
    pub fn new(
        users: &'a dyn UserStore,
        password_encoder: &'a dyn PasswordEncoder,
        jwt_utils: &'a JwtUtils,
    ) -> Self {
        AuthService {
            users,
            password_encoder,
            jwt_utils,
        }
    }

    /// Check an email/password pair against the stored credentials.
    ///
    /// An unknown email and a wrong password fail the same way, so callers
    /// cannot tell which one was wrong.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<Principal> {
        let Some(user) = self.users.find_by_email(email).await? else {
            // Same hashing cost as a known account with a wrong password.
            self.password_encoder.verify_dummy(password)?;
            warn!("Login attempt for unknown account");
            return Err(ServiceError::InvalidCredentials);
        };

        if !self.password_encoder.matches(password, &user.password)? {
            warn!("Login attempt with wrong password for user {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(Principal::from(&user))
    }

    /// Authenticate the user and issue a bearer token
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<JwtResponse> {
        validate_payload(&login_request)?;

        let principal = self
            .authenticate(&login_request.email, &login_request.password)
            .await?;
        let token = self.jwt_utils.issue(&principal)?;

        info!("User {} logged in", principal.id);
        Ok(JwtResponse::bearer(token, &principal))
    }

    /// Create a regular (non admin) account
    pub async fn register(&self, signup_request: SignupRequest) -> ServiceResult<MessageResponse> {
        validate_payload(&signup_request)?;

        if self.users.exists_by_email(&signup_request.email).await? {
            return Err(ServiceError::already_exists(
                "User",
                signup_request.email,
                EMAIL_TAKEN_MESSAGE,
            ));
        }

        let password_hash = self.password_encoder.encode(&signup_request.password)?;
        let email = signup_request.email.clone();

        let outcome = self
            .users
            .insert(NewUser {
                email: signup_request.email,
                first_name: signup_request.first_name,
                last_name: signup_request.last_name,
                password_hash,
                admin: false,
            })
            .await?;

        // A concurrent sign-up can claim the email after the check above.
        let InsertOutcome::Inserted(user) = outcome else {
            warn!("Sign-up lost a race for an email that is now taken");
            return Err(ServiceError::already_exists(
                "User",
                email,
                EMAIL_TAKEN_MESSAGE,
            ));
        };

        info!("Registered user {}", user.id);
        Ok(MessageResponse::new(REGISTERED_MESSAGE))
    }
}
