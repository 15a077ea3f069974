use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::entities::designs::DesignStatus;
use crate::entities::{designs, products, users};

pub mod migrator;
pub mod repositories;

pub use repositories::design::{DesignProductRow, DesignStats, NewDesign, PlatformStats};
pub use repositories::product::NewProduct;
pub use repositories::user::{BankUpdate, NewUser, ProfileUpdate, User};

/// Fixed-width UTC timestamp so stored strings sort chronologically.
#[must_use]
pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

/// True when the error chain carries a unique-constraint violation from the database.
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sea_orm::DbErr>()
        .and_then(sea_orm::DbErr::sql_err)
        .is_some_and(|e| matches!(e, sea_orm::SqlErr::UniqueConstraintViolation(_)))
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    fn design_repo(&self) -> repositories::design::DesignRepository {
        repositories::design::DesignRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn create_user(&self, user: NewUser, security: &SecurityConfig) -> Result<User> {
        self.user_repo().create(user, security).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn update_user_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<User> {
        self.user_repo().update_profile(id, update).await
    }

    pub async fn update_user_bank(&self, id: Uuid, update: BankUpdate) -> Result<User> {
        self.user_repo().update_bank(id, update).await
    }

    pub async fn count_users_by_role(&self, role: users::Role) -> Result<u64> {
        self.user_repo().count_by_role(role).await
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub async fn create_product(&self, product: NewProduct) -> Result<products::Model> {
        self.product_repo().create(product).await
    }

    /// Inserts the product unless one with the same name exists.
    /// Returns the row and whether it was created.
    pub async fn get_or_create_product(
        &self,
        product: NewProduct,
    ) -> Result<(products::Model, bool)> {
        self.product_repo().get_or_create(product).await
    }

    pub async fn list_active_products(&self) -> Result<Vec<products::Model>> {
        self.product_repo().list_active().await
    }

    pub async fn get_products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<products::Model>> {
        self.product_repo().get_by_ids(ids).await
    }

    pub async fn count_active_products(&self) -> Result<u64> {
        self.product_repo().count_active().await
    }

    // ========================================================================
    // Designs
    // ========================================================================

    pub async fn create_design(&self, design: NewDesign) -> Result<designs::Model> {
        self.design_repo().create_with_products(design).await
    }

    pub async fn get_design(&self, id: Uuid) -> Result<Option<designs::Model>> {
        self.design_repo().get(id).await
    }

    pub async fn list_designs(
        &self,
        creator_id: Option<Uuid>,
        status: Option<DesignStatus>,
    ) -> Result<Vec<designs::Model>> {
        self.design_repo().list(creator_id, status).await
    }

    pub async fn get_design_products(&self, design_id: Uuid) -> Result<Vec<DesignProductRow>> {
        self.design_repo().products_for(design_id).await
    }

    pub async fn set_design_review(
        &self,
        id: Uuid,
        status: DesignStatus,
        reject_reason: Option<String>,
    ) -> Result<Option<designs::Model>> {
        self.design_repo()
            .set_review(id, status, reject_reason)
            .await
    }

    pub async fn delete_design(&self, id: Uuid) -> Result<bool> {
        self.design_repo().delete(id).await
    }

    pub async fn creator_design_stats(&self, creator_id: Uuid) -> Result<DesignStats> {
        self.design_repo().stats(Some(creator_id)).await
    }

    pub async fn all_design_stats(&self) -> Result<DesignStats> {
        self.design_repo().stats(None).await
    }

    pub async fn recent_designs(
        &self,
        creator_id: Option<Uuid>,
        limit: u64,
    ) -> Result<Vec<designs::Model>> {
        self.design_repo().recent(creator_id, limit).await
    }

    pub async fn recently_updated_designs(&self, limit: u64) -> Result<Vec<designs::Model>> {
        self.design_repo().recently_updated(limit).await
    }

    pub async fn pending_designs(&self, limit: u64) -> Result<Vec<designs::Model>> {
        self.design_repo().pending(limit).await
    }

    pub async fn count_design_products(&self, design_id: Uuid) -> Result<u64> {
        self.design_repo().count_products(design_id).await
    }

    pub async fn platform_stats(&self) -> Result<PlatformStats> {
        let designs = self.all_design_stats().await?;
        Ok(PlatformStats {
            total_creators: self.count_users_by_role(users::Role::Creator).await?,
            total_designs: designs.total,
            total_products: self.count_active_products().await?,
            pending_reviews: designs.pending,
            approved_designs: designs.approved,
        })
    }
}
