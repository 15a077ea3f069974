//! `SeaORM` implementation of the `DesignService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::types::{
    DeletionDto, DesignDetailDto, DesignDto, DesignProductDto, DesignSummaryDto, ReviewDto,
    SubmissionDto,
};
use crate::constants::limits;
use crate::db::{NewDesign, Store};
use crate::domain::{Principal, ReviewDecision};
use crate::entities::designs::{self, DesignStatus};
use crate::services::design_service::{DesignError, DesignService, DesignSubmission};
use crate::services::storage::{ImageKind, ImageStorage, ImageUpload};

pub struct SeaOrmDesignService {
    store: Store,
    storage: Arc<dyn ImageStorage>,
    max_upload_bytes: usize,
}

impl SeaOrmDesignService {
    #[must_use]
    pub fn new(store: Store, storage: Arc<dyn ImageStorage>, max_upload_bytes: usize) -> Self {
        Self {
            store,
            storage,
            max_upload_bytes,
        }
    }

    async fn load(&self, id: Uuid) -> Result<designs::Model, DesignError> {
        self.store
            .get_design(id)
            .await?
            .ok_or(DesignError::NotFound(id))
    }

    async fn summary(&self, design: designs::Model) -> Result<DesignSummaryDto, DesignError> {
        let product_count = self.store.count_design_products(design.id).await?;
        Ok(DesignSummaryDto {
            id: design.id,
            title: design.title,
            image: design.image,
            status: design.status,
            product_count,
        })
    }

    async fn detail_of(&self, design: designs::Model) -> Result<DesignDetailDto, DesignError> {
        let products = self
            .store
            .get_design_products(design.id)
            .await?
            .into_iter()
            .map(DesignProductDto::from)
            .collect();

        Ok(DesignDetailDto {
            design: DesignDto::from(design),
            products,
        })
    }

    /// Checks the selection against the catalog. Returns the ids deduplicated
    /// in their original order.
    async fn validate_products(&self, product_ids: &[Uuid]) -> Result<Vec<Uuid>, DesignError> {
        let mut unique = Vec::with_capacity(product_ids.len());
        for id in product_ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        if unique.is_empty() {
            return Err(DesignError::Validation(
                "Please select at least one product".to_string(),
            ));
        }

        let found = self.store.get_products_by_ids(&unique).await?;
        if found.len() != unique.len() {
            return Err(DesignError::Validation(
                "One or more selected products do not exist".to_string(),
            ));
        }

        if let Some(inactive) = found.iter().find(|p| !p.is_active) {
            return Err(DesignError::Validation(format!(
                "Product '{}' is not available",
                inactive.name
            )));
        }

        Ok(unique)
    }
}

pub(crate) fn validate_title(title: &str) -> Result<String, DesignError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DesignError::Validation("Title is required".to_string()));
    }
    if title.chars().count() > limits::TITLE_MAX {
        return Err(DesignError::Validation(format!(
            "Title must be {} characters or less",
            limits::TITLE_MAX
        )));
    }
    Ok(title.to_string())
}

/// Renders a byte limit in the largest unit that divides it exactly.
fn format_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * KIB;

    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

pub(crate) fn validate_image(
    image: Option<ImageUpload>,
    max_bytes: usize,
) -> Result<ImageUpload, DesignError> {
    let image = image
        .filter(|i| !i.bytes.is_empty())
        .ok_or_else(|| DesignError::Validation("Please choose an image file".to_string()))?;

    if image.bytes.len() > max_bytes {
        return Err(DesignError::Validation(format!(
            "Image is too large (max {})",
            format_size(max_bytes)
        )));
    }

    if ImageKind::sniff(&image.bytes).is_none() {
        return Err(DesignError::Validation(
            "Only PNG and JPEG images are accepted".to_string(),
        ));
    }

    Ok(image)
}

#[async_trait]
impl DesignService for SeaOrmDesignService {
    async fn submit(
        &self,
        principal: &Principal,
        submission: DesignSubmission,
    ) -> Result<SubmissionDto, DesignError> {
        let title = validate_title(&submission.title)?;
        let image = validate_image(submission.image, self.max_upload_bytes)?;
        let product_ids = self.validate_products(&submission.product_ids).await?;
        let description = submission
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let image_url = self
            .storage
            .upload(&image, principal.id)
            .await
            .map_err(|e| DesignError::Storage(e.to_string()))?;

        let design = match self
            .store
            .create_design(NewDesign {
                creator_id: principal.id,
                title,
                description,
                image: image_url.clone(),
                product_ids,
            })
            .await
        {
            Ok(design) => design,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&image_url).await {
                    warn!(error = %cleanup, url = %image_url, "Failed to remove orphaned image");
                }
                return Err(e.into());
            }
        };

        metrics::counter!("picu_designs_submitted_total").increment(1);

        Ok(SubmissionDto {
            message: "Design uploaded successfully! Waiting for admin review.".to_string(),
            design: self.detail_of(design).await?,
        })
    }

    async fn list(
        &self,
        principal: &Principal,
        status: Option<DesignStatus>,
    ) -> Result<Vec<DesignDto>, DesignError> {
        let creator = (!principal.is_admin()).then_some(principal.id);
        let designs = self.store.list_designs(creator, status).await?;
        Ok(designs.into_iter().map(DesignDto::from).collect())
    }

    async fn detail(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<DesignDetailDto, DesignError> {
        let design = self.load(id).await?;
        if !principal.can_view(design.creator_id) {
            return Err(DesignError::Forbidden(
                "You do not have permission to view this design".to_string(),
            ));
        }
        self.detail_of(design).await
    }

    async fn review(
        &self,
        principal: &Principal,
        id: Uuid,
        decision: ReviewDecision,
    ) -> Result<ReviewDto, DesignError> {
        if !principal.can_review() {
            return Err(DesignError::Forbidden(
                "Only admins can review designs".to_string(),
            ));
        }

        let design = self.load(id).await?;
        let outcome = decision.apply(design.status);

        let updated = self
            .store
            .set_design_review(id, outcome.status, outcome.reject_reason)
            .await?
            .ok_or(DesignError::NotFound(id))?;

        info!(
            design_id = %id,
            reviewer = %principal.email,
            decision = decision.label(),
            "Design reviewed"
        );
        metrics::counter!("picu_design_reviews_total", "decision" => decision.label())
            .increment(1);

        let verb = match decision {
            ReviewDecision::Approve => "approved",
            ReviewDecision::Reject { .. } => "rejected",
        };

        Ok(ReviewDto {
            message: format!("Design \"{}\" has been {verb}", updated.title),
            design: DesignDto::from(updated),
        })
    }

    async fn review_target(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<DesignSummaryDto, DesignError> {
        if !principal.can_review() {
            return Err(DesignError::Forbidden(
                "Only admins can review designs".to_string(),
            ));
        }
        let design = self.load(id).await?;
        self.summary(design).await
    }

    async fn delete_target(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<DesignSummaryDto, DesignError> {
        let design = self.load(id).await?;
        if !principal.can_delete(design.creator_id) {
            return Err(DesignError::Forbidden(
                "You do not have permission to delete this design".to_string(),
            ));
        }
        self.summary(design).await
    }

    async fn delete(&self, principal: &Principal, id: Uuid) -> Result<DeletionDto, DesignError> {
        let design = self.load(id).await?;
        if !principal.can_delete(design.creator_id) {
            return Err(DesignError::Forbidden(
                "You do not have permission to delete this design".to_string(),
            ));
        }

        if !self.store.delete_design(id).await? {
            return Err(DesignError::NotFound(id));
        }

        let image_removed = match self.storage.delete(&design.image).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(error = %e, design_id = %id, url = %design.image, "Failed to delete design image");
                false
            }
        };

        metrics::counter!("picu_designs_deleted_total").increment(1);

        Ok(DeletionDto {
            message: format!("Design \"{}\" has been deleted", design.title),
            id,
            image_removed,
        })
    }
}
