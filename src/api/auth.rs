use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tower_sessions::Session;
use uuid::Uuid;

use super::{ApiError, ApiResponse, AppState, LoginRequest, SessionDto, SignupRequest, UserDto};
use crate::constants::session::USER_KEY;
use crate::db::User;
use crate::domain::Principal;

pub const CREATOR_DASHBOARD: &str = "/dashboard/dashboard/";
pub const ADMIN_DASHBOARD: &str = "/dashboard/admin-dashboard/";

#[derive(Serialize)]
pub struct LandingResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub signup: &'static str,
    pub login: &'static str,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the caller and stores the [`Principal`] in request extensions.
///
/// Checks, in order:
/// 1. Session cookie (from signup/login)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
///
/// Never rejects; see [`require_auth`].
pub async fn resolve_principal(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let mut principal = None;

    if let Ok(Some(user_id)) = session.get::<Uuid>(USER_KEY).await {
        match state.shared.auth_service.get_principal(user_id).await {
            Ok(found) => principal = found,
            Err(e) => tracing::warn!(error = %e, "Failed to resolve session user"),
        }
    }

    if principal.is_none()
        && let Some(key) = extract_api_key(&headers)
    {
        match state.shared.auth_service.verify_api_key(&key).await {
            Ok(found) => principal = found,
            Err(e) => tracing::warn!(error = %e, "Failed to verify API key"),
        }
    }

    if let Some(principal) = principal {
        tracing::Span::current().record("user_id", tracing::field::display(principal.id));
        request.extensions_mut().insert(principal);
    }

    next.run(request).await
}

/// Rejects requests that [`resolve_principal`] could not attach a caller to.
pub async fn require_auth(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<Principal>().is_none() {
        return Err(ApiError::Unauthorized("Authentication required".to_string()));
    }
    Ok(next.run(request).await)
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

#[must_use]
pub fn dashboard_for(principal: &Principal) -> &'static str {
    if principal.is_admin() {
        ADMIN_DASHBOARD
    } else {
        CREATOR_DASHBOARD
    }
}

async fn open_session(session: &Session, user: &User) -> Result<(), ApiError> {
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to rotate session: {e}")))?;
    session
        .insert(USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

fn session_dto(user: User) -> SessionDto {
    let redirect = dashboard_for(&Principal::from(user.clone())).to_string();
    SessionDto {
        api_key: user.api_key.clone(),
        user: UserDto::from(user),
        redirect,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Signed-in callers are sent to their dashboard.
pub async fn index(principal: Option<Extension<Principal>>) -> Response {
    if let Some(Extension(principal)) = principal {
        return Redirect::to(dashboard_for(&principal)).into_response();
    }

    Json(ApiResponse::success(LandingResponse {
        name: "PICU Creator Portal",
        version: env!("CARGO_PKG_VERSION"),
        signup: "/accounts/signup/",
        login: "/accounts/login/",
    }))
    .into_response()
}

/// POST /accounts/signup/
pub async fn signup(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionDto>>), ApiError> {
    let user = state.shared.auth_service.signup(payload).await?;
    open_session(&session, &user).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(session_dto(user)))))
}

/// POST /accounts/login/
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let user = state.shared.auth_service.login(payload).await?;
    open_session(&session, &user).await?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(ApiResponse::success(session_dto(user))))
}

/// POST /accounts/logout/
pub async fn logout(session: Session) -> Json<ApiResponse<MessageResponse>> {
    let _ = session.flush().await;
    Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    }))
}
