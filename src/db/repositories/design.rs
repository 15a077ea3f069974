use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::domain::generate_sku;
use crate::entities::designs::DesignStatus;
use crate::entities::products::Category;
use crate::entities::{design_products, designs, products};

#[derive(Debug, Clone)]
pub struct NewDesign {
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image: String,
    pub product_ids: Vec<Uuid>,
}

/// A design/product pairing joined with its catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct DesignProductRow {
    pub id: Uuid,
    pub sku: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub category: Option<Category>,
    pub base_cost: Option<i64>,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DesignStats {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformStats {
    pub total_creators: u64,
    pub total_designs: u64,
    pub total_products: u64,
    pub pending_reviews: u64,
    pub approved_designs: u64,
}

pub struct DesignRepository {
    conn: DatabaseConnection,
}

impl DesignRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts the design and one row per product in a single transaction.
    /// Any failure (including a SKU collision) rolls the whole submission back.
    pub async fn create_with_products(&self, design: NewDesign) -> Result<designs::Model> {
        let now = crate::db::timestamp();
        let design_id = Uuid::new_v4();

        let txn = self.conn.begin().await?;

        let model = designs::ActiveModel {
            id: Set(design_id),
            creator_id: Set(design.creator_id),
            title: Set(design.title),
            description: Set(design.description),
            image: Set(design.image),
            status: Set(DesignStatus::Pending),
            reject_reason: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        }
        .insert(&txn)
        .await
        .context("Failed to insert design")?;

        for product_id in &design.product_ids {
            design_products::ActiveModel {
                id: Set(Uuid::new_v4()),
                design_id: Set(design_id),
                product_id: Set(*product_id),
                sku: Set(generate_sku(design_id, *product_id)),
                created_at: Set(now.clone()),
            }
            .insert(&txn)
            .await
            .with_context(|| format!("Failed to insert design product for {product_id}"))?;
        }

        txn.commit().await?;

        info!(
            design_id = %model.id,
            creator_id = %model.creator_id,
            products = design.product_ids.len(),
            "Created design"
        );
        Ok(model)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<designs::Model>> {
        designs::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query design")
    }

    pub async fn list(
        &self,
        creator_id: Option<Uuid>,
        status: Option<DesignStatus>,
    ) -> Result<Vec<designs::Model>> {
        let mut query = designs::Entity::find();

        if let Some(creator_id) = creator_id {
            query = query.filter(designs::Column::CreatorId.eq(creator_id));
        }
        if let Some(status) = status {
            query = query.filter(designs::Column::Status.eq(status));
        }

        query
            .order_by_desc(designs::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list designs")
    }

    pub async fn products_for(&self, design_id: Uuid) -> Result<Vec<DesignProductRow>> {
        let rows = design_products::Entity::find()
            .filter(design_products::Column::DesignId.eq(design_id))
            .order_by_asc(design_products::Column::Sku)
            .find_also_related(products::Entity)
            .all(&self.conn)
            .await
            .context("Failed to query design products")?;

        Ok(rows
            .into_iter()
            .map(|(row, product)| DesignProductRow {
                id: row.id,
                sku: row.sku,
                product_id: row.product_id,
                product_name: product
                    .as_ref()
                    .map_or_else(|| "Unknown".to_string(), |p| p.name.clone()),
                category: product.as_ref().map(|p| p.category),
                base_cost: product.as_ref().map(|p| p.base_cost),
                created_at: row.created_at,
            })
            .collect())
    }

    pub async fn count_products(&self, design_id: Uuid) -> Result<u64> {
        design_products::Entity::find()
            .filter(design_products::Column::DesignId.eq(design_id))
            .count(&self.conn)
            .await
            .context("Failed to count design products")
    }

    pub async fn set_review(
        &self,
        id: Uuid,
        status: DesignStatus,
        reject_reason: Option<String>,
    ) -> Result<Option<designs::Model>> {
        let Some(design) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: designs::ActiveModel = design.into();
        active.status = Set(status);
        active.reject_reason = Set(reject_reason);
        active.updated_at = Set(crate::db::timestamp());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update design review")?;
        Ok(Some(updated))
    }

    /// Removes the design and its product rows. Returns false if nothing matched.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let products = design_products::Entity::delete_many()
            .filter(design_products::Column::DesignId.eq(id))
            .exec(&txn)
            .await
            .context("Failed to delete design products")?;

        let result = designs::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete design")?;

        txn.commit().await?;

        if result.rows_affected > 0 {
            info!(
                design_id = %id,
                design_products = products.rows_affected,
                "Deleted design"
            );
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn stats(&self, creator_id: Option<Uuid>) -> Result<DesignStats> {
        let mut stats = DesignStats::default();

        for status in [
            DesignStatus::Pending,
            DesignStatus::Approved,
            DesignStatus::Rejected,
        ] {
            let mut query = designs::Entity::find().filter(designs::Column::Status.eq(status));
            if let Some(creator_id) = creator_id {
                query = query.filter(designs::Column::CreatorId.eq(creator_id));
            }
            let count = query
                .count(&self.conn)
                .await
                .context("Failed to count designs")?;

            match status {
                DesignStatus::Pending => stats.pending = count,
                DesignStatus::Approved => stats.approved = count,
                DesignStatus::Rejected => stats.rejected = count,
            }
        }

        stats.total = stats.pending + stats.approved + stats.rejected;
        Ok(stats)
    }

    pub async fn recent(&self, creator_id: Option<Uuid>, limit: u64) -> Result<Vec<designs::Model>> {
        let mut query = designs::Entity::find();
        if let Some(creator_id) = creator_id {
            query = query.filter(designs::Column::CreatorId.eq(creator_id));
        }

        query
            .order_by_desc(designs::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query recent designs")
    }

    pub async fn recently_updated(&self, limit: u64) -> Result<Vec<designs::Model>> {
        designs::Entity::find()
            .order_by_desc(designs::Column::UpdatedAt)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query recently updated designs")
    }

    pub async fn pending(&self, limit: u64) -> Result<Vec<designs::Model>> {
        designs::Entity::find()
            .filter(designs::Column::Status.eq(DesignStatus::Pending))
            .order_by_desc(designs::Column::CreatedAt)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to query pending designs")
    }
}
