//! Domain service for design submissions: upload, review, listing and deletion.

use thiserror::Error;
use uuid::Uuid;

use crate::api::types::{
    DeletionDto, DesignDetailDto, DesignDto, DesignSummaryDto, ReviewDto, SubmissionDto,
};
use crate::domain::{Principal, ReviewDecision};
use crate::entities::designs::DesignStatus;
use crate::services::storage::ImageUpload;

#[derive(Debug, Error)]
pub enum DesignError {
    #[error("{0}")]
    Validation(String),

    #[error("Design not found: {0}")]
    NotFound(Uuid),

    #[error("{0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for DesignError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for DesignError {
    fn from(err: anyhow::Error) -> Self {
        if crate::db::is_unique_violation(&err) {
            return Self::Conflict(
                "A product SKU for this design already exists, please try again".to_string(),
            );
        }
        Self::Internal(err.to_string())
    }
}

/// Everything a creator sends when submitting a design.
#[derive(Debug, Clone)]
pub struct DesignSubmission {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
    pub product_ids: Vec<Uuid>,
}

#[async_trait::async_trait]
pub trait DesignService: Send + Sync {
    /// Validates and stores a new design with its product rows.
    ///
    /// # Errors
    ///
    /// - [`DesignError::Validation`] for bad input; nothing is stored
    /// - [`DesignError::Conflict`] when a SKU collides; nothing is stored
    async fn submit(
        &self,
        principal: &Principal,
        submission: DesignSubmission,
    ) -> Result<SubmissionDto, DesignError>;

    /// Designs visible to the caller, newest first.
    async fn list(
        &self,
        principal: &Principal,
        status: Option<DesignStatus>,
    ) -> Result<Vec<DesignDto>, DesignError>;

    async fn detail(&self, principal: &Principal, id: Uuid)
    -> Result<DesignDetailDto, DesignError>;

    /// Applies an admin review decision.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Forbidden`] for non-admins without touching the row.
    async fn review(
        &self,
        principal: &Principal,
        id: Uuid,
        decision: ReviewDecision,
    ) -> Result<ReviewDto, DesignError>;

    async fn approve(&self, principal: &Principal, id: Uuid) -> Result<ReviewDto, DesignError> {
        self.review(principal, id, ReviewDecision::Approve).await
    }

    async fn reject(
        &self,
        principal: &Principal,
        id: Uuid,
        reason: String,
    ) -> Result<ReviewDto, DesignError> {
        self.review(principal, id, ReviewDecision::Reject { reason })
            .await
    }

    async fn review_target(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<DesignSummaryDto, DesignError>;

    async fn delete_target(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<DesignSummaryDto, DesignError>;

    /// Deletes the design and its product rows, then the stored image.
    /// Image removal failures are logged, never returned.
    async fn delete(&self, principal: &Principal, id: Uuid) -> Result<DeletionDto, DesignError>;
}
