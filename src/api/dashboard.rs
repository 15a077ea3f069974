use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::auth::ADMIN_DASHBOARD;
use super::{AdminDashboardDto, ApiError, ApiResponse, AppState};
use crate::domain::Principal;

/// GET /dashboard/dashboard/
/// Admins are redirected to the admin dashboard.
pub async fn creator_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Response, ApiError> {
    if principal.is_admin() {
        return Ok(Redirect::to(ADMIN_DASHBOARD).into_response());
    }

    let dashboard = state.shared.dashboard_service.creator(&principal).await?;
    Ok(Json(ApiResponse::success(dashboard)).into_response())
}

/// GET /dashboard/admin-dashboard/
pub async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<AdminDashboardDto>>, ApiError> {
    let dashboard = state.shared.dashboard_service.admin(&principal).await?;
    Ok(Json(ApiResponse::success(dashboard)))
}
