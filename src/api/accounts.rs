use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, BankDto, BankRequest, ProfileRequest, UserDto};
use crate::domain::Principal;

/// GET /accounts/
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let profile = state.shared.account_service.profile(principal.id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// POST /accounts/
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let profile = state
        .shared
        .account_service
        .update_profile(principal.id, payload)
        .await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// GET /accounts/bank/
pub async fn get_bank(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<BankDto>>, ApiError> {
    let bank = state.shared.account_service.bank(principal.id).await?;
    Ok(Json(ApiResponse::success(bank)))
}

/// POST /accounts/bank/
pub async fn update_bank(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<BankRequest>,
) -> Result<Json<ApiResponse<BankDto>>, ApiError> {
    let bank = state
        .shared
        .account_service
        .update_bank(principal.id, payload)
        .await?;
    Ok(Json(ApiResponse::success(bank)))
}
