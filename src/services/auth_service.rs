//! Domain service for authentication: signup, login and caller resolution.

use thiserror::Error;
use uuid::Uuid;

use crate::api::types::{LoginRequest, SignupRequest};
use crate::db::User;
use crate::domain::Principal;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        if crate::db::is_unique_violation(&err) {
            return Self::EmailTaken;
        }
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new creator account.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] when a field is missing or malformed
    /// - [`AuthError::EmailTaken`] when the email is already registered
    async fn signup(&self, request: SignupRequest) -> Result<User, AuthError>;

    /// Verifies credentials and returns the user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, request: LoginRequest) -> Result<User, AuthError>;

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<Principal>, AuthError>;

    /// Resolves a session's user id to a principal.
    async fn get_principal(&self, id: Uuid) -> Result<Option<Principal>, AuthError>;
}
