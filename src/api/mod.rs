use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::state::SharedState;

mod accounts;
pub mod auth;
mod dashboard;
mod designs;
mod error;
mod observability;
mod products;
pub mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;

/// Room for the non-file multipart fields on top of the image itself.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (media_root, cors_origins, secure_cookies, inactivity_minutes, max_upload_bytes) = {
        let config = state.config().read().await;
        (
            config.storage.media_root.clone(),
            config.server.cors_allowed_origins.clone(),
            config.server.secure_cookies,
            config.server.session_inactivity_minutes,
            config.storage.max_upload_bytes,
        )
    };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            inactivity_minutes,
        )));

    let app_routes = Router::new()
        .merge(create_protected_router(max_upload_bytes))
        .route("/", get(auth::index))
        .route("/accounts/signup/", post(auth::signup))
        .route("/accounts/login/", post(auth::login))
        .route("/accounts/logout/", post(auth::logout))
        .route("/health", get(observability::health))
        .route("/metrics", get(observability::get_metrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::resolve_principal,
        ))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .merge(app_routes)
        .nest_service("/media", ServeDir::new(media_root))
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/accounts/",
            get(accounts::get_profile).post(accounts::update_profile),
        )
        .route(
            "/accounts/bank/",
            get(accounts::get_bank).post(accounts::update_bank),
        )
        .route("/dashboard/dashboard/", get(dashboard::creator_dashboard))
        .route(
            "/dashboard/admin-dashboard/",
            get(dashboard::admin_dashboard),
        )
        .route("/designs/", get(designs::list_designs))
        .route(
            "/designs/upload/",
            get(designs::upload_form)
                .post(designs::upload_design)
                .layer(DefaultBodyLimit::max(
                    max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
                )),
        )
        .route("/designs/{id}/", get(designs::get_design))
        .route("/designs/{id}/approve/", post(designs::approve_design))
        .route(
            "/designs/{id}/reject/",
            get(designs::reject_target).post(designs::reject_design),
        )
        .route(
            "/designs/{id}/delete/",
            get(designs::delete_target).post(designs::delete_design),
        )
        .route(
            "/products/",
            get(products::list_products).post(products::create_product),
        )
        .route_layer(middleware::from_fn(auth::require_auth))
}
