//! Domain service for a user's own profile and payout bank details.

use thiserror::Error;
use uuid::Uuid;

use crate::api::types::{BankDto, BankRequest, ProfileRequest, UserDto};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    async fn profile(&self, user_id: Uuid) -> Result<UserDto, AccountError>;

    /// Updates name, phone and instagram. The email cannot be changed here.
    async fn update_profile(
        &self,
        user_id: Uuid,
        request: ProfileRequest,
    ) -> Result<UserDto, AccountError>;

    async fn bank(&self, user_id: Uuid) -> Result<BankDto, AccountError>;

    /// Replaces the bank details. Blank fields are cleared.
    async fn update_bank(&self, user_id: Uuid, request: BankRequest)
    -> Result<BankDto, AccountError>;
}
