use async_trait::async_trait;

use crate::api::types::{AdminDashboardDto, CreatorDashboardDto, DesignDto};
use crate::constants::limits;
use crate::db::Store;
use crate::domain::Principal;
use crate::entities::designs;
use crate::services::dashboard_service::{DashboardError, DashboardService};

pub struct SeaOrmDashboardService {
    store: Store,
}

impl SeaOrmDashboardService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn dtos(models: Vec<designs::Model>) -> Vec<DesignDto> {
    models.into_iter().map(DesignDto::from).collect()
}

#[async_trait]
impl DashboardService for SeaOrmDashboardService {
    async fn creator(&self, principal: &Principal) -> Result<CreatorDashboardDto, DashboardError> {
        let stats = self.store.creator_design_stats(principal.id).await?;
        let recent = self
            .store
            .recent_designs(Some(principal.id), limits::RECENT_CREATOR_DESIGNS)
            .await?;

        Ok(CreatorDashboardDto {
            stats,
            recent_designs: dtos(recent),
        })
    }

    async fn admin(&self, principal: &Principal) -> Result<AdminDashboardDto, DashboardError> {
        if !principal.is_admin() {
            return Err(DashboardError::Forbidden);
        }

        let stats = self.store.platform_stats().await?;
        let pending = self
            .store
            .pending_designs(limits::ADMIN_DASHBOARD_ROWS)
            .await?;
        let recent = self
            .store
            .recently_updated_designs(limits::ADMIN_DASHBOARD_ROWS)
            .await?;

        Ok(AdminDashboardDto {
            stats,
            pending_designs: dtos(pending),
            recent_designs: dtos(recent),
        })
    }
}
