//! JWT token utilities for authentication.
//!
//! Provides token creation and validation for bearer authentication. Tokens
//! are HS512-signed, carry the user's email as subject, and are never stored
//! server side.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::auth::models::Principal;
use crate::config::Config;
use crate::errors::{ServiceError, TokenError};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User email
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.sub
    }

    /// Check if token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl JwtUtils {
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        JwtUtils {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in: Duration::seconds(expires_in_seconds as i64),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expires_in_seconds)
    }

    /// Generate a new token for the principal
    pub fn issue(&self, principal: &Principal) -> Result<String, ServiceError> {
        self.issue_at(principal, Utc::now())
    }

    pub fn issue_at(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<String, ServiceError> {
        let claims = Claims {
            sub: principal.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate a token and return its subject
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.verify_claims_at(token, now).map(|claims| claims.sub)
    }

    /// Validate a token and return all of its claims
    pub fn verify_claims(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_claims_at(token, Utc::now())
    }

    fn verify_claims_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = self.decode_claims(token)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Read the subject without checking signature or expiry.
    ///
    /// Only for display. Identity must come from [`JwtUtils::verify`].
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        check_structure(token)?;

        let mut validation = Validation::new(Algorithm::HS512);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["sub"]);

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims.sub)
            .map_err(|_| TokenError::Malformed)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        check_structure(token)?;

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                // The header already parsed, so these can only come from the MAC check.
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                _ => TokenError::Malformed,
            })
    }
}

/// Rejects anything that is not `header.payload.signature` with a parseable
/// header naming a known algorithm.
fn check_structure(token: &str) -> Result<(), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments[0].is_empty() || segments[1].is_empty() {
        return Err(TokenError::Malformed);
    }
    if segments[2].is_empty() {
        // Unsigned token.
        return Err(TokenError::Malformed);
    }
    decode_header(token).map_err(|_| TokenError::Malformed)?;
    Ok(())
}
