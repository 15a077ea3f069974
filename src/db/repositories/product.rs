use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::products::{self, Category};

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    /// Hundredths of the currency unit.
    pub base_cost: i64,
    pub is_active: bool,
}

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, product: NewProduct) -> Result<products::Model> {
        let model = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(product.name),
            description: Set(product.description),
            category: Set(product.category),
            base_cost: Set(product.base_cost),
            is_active: Set(product.is_active),
            created_at: Set(crate::db::timestamp()),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert product")?;

        info!(product_id = %model.id, name = %model.name, "Created product");
        Ok(model)
    }

    pub async fn get_or_create(&self, product: NewProduct) -> Result<(products::Model, bool)> {
        let existing = products::Entity::find()
            .filter(products::Column::Name.eq(product.name.as_str()))
            .one(&self.conn)
            .await
            .context("Failed to query product by name")?;

        if let Some(existing) = existing {
            return Ok((existing, false));
        }

        Ok((self.create(product).await?, true))
    }

    pub async fn list_active(&self) -> Result<Vec<products::Model>> {
        products::Entity::find()
            .filter(products::Column::IsActive.eq(true))
            .order_by_asc(products::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list active products")
    }

    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<products::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        products::Entity::find()
            .filter(products::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(products::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to query products by IDs")
    }

    pub async fn count_active(&self) -> Result<u64> {
        products::Entity::find()
            .filter(products::Column::IsActive.eq(true))
            .count(&self.conn)
            .await
            .context("Failed to count active products")
    }
}
