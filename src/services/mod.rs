pub mod fields;

pub mod storage;
pub use storage::{ImageStorage, ImageUpload, LocalStorage, StorageService, SupabaseStorage};

pub mod auth_service;
pub use auth_service::{AuthError, AuthService};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod account_service;
pub use account_service::{AccountError, AccountService};

pub mod account_service_impl;
pub use account_service_impl::SeaOrmAccountService;

pub mod design_service;
pub use design_service::{DesignError, DesignService, DesignSubmission};

pub mod design_service_impl;
pub use design_service_impl::SeaOrmDesignService;

pub mod dashboard_service;
pub use dashboard_service::{DashboardError, DashboardService};

pub mod dashboard_service_impl;
pub use dashboard_service_impl::SeaOrmDashboardService;
