use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountService, AuthService, DashboardService, DesignService, ImageStorage,
    SeaOrmAccountService, SeaOrmAuthService, SeaOrmDashboardService, SeaOrmDesignService,
    StorageService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub account_service: Arc<dyn AccountService>,

    pub design_service: Arc<dyn DesignService>,

    pub dashboard_service: Arc<dyn DashboardService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let storage = StorageService::from_config(&config.storage)?.into_shared();
        Self::with_storage(config, storage).await
    }

    /// Builds the state around an explicit image storage backend.
    pub async fn with_storage(
        config: Config,
        storage: Arc<dyn ImageStorage>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let account_service =
            Arc::new(SeaOrmAccountService::new(store.clone())) as Arc<dyn AccountService>;

        let design_service = Arc::new(SeaOrmDesignService::new(
            store.clone(),
            storage,
            config.storage.max_upload_bytes,
        )) as Arc<dyn DesignService>;

        let dashboard_service =
            Arc::new(SeaOrmDashboardService::new(store.clone())) as Arc<dyn DashboardService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth_service,
            account_service,
            design_service,
            dashboard_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
