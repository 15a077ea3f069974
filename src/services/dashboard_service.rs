//! Domain service for the creator and admin dashboards.

use thiserror::Error;

use crate::api::types::{AdminDashboardDto, CreatorDashboardDto};
use crate::domain::Principal;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Admin access required")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for DashboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait DashboardService: Send + Sync {
    /// Status counts and the most recent designs for the caller.
    async fn creator(&self, principal: &Principal) -> Result<CreatorDashboardDto, DashboardError>;

    /// Platform-wide statistics and review queues.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Forbidden`] for non-admins.
    async fn admin(&self, principal: &Principal) -> Result<AdminDashboardDto, DashboardError>;
}
