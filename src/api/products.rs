use axum::{Extension, Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::validation::{parse_base_cost, validate_product_name};
use super::{ApiError, ApiResponse, AppState, CreateProductRequest, ProductDto};
use crate::db::NewProduct;
use crate::domain::Principal;
use crate::entities::products::Category;

/// GET /products/
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, ApiError> {
    let products = state
        .store()
        .list_active_products()
        .await?
        .into_iter()
        .map(ProductDto::from)
        .collect();
    Ok(Json(ApiResponse::success(products)))
}

/// POST /products/
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), ApiError> {
    if !principal.is_admin() {
        return Err(ApiError::forbidden("Only admins can manage products"));
    }

    let product = NewProduct {
        name: validate_product_name(&payload.name)?,
        description: payload
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        category: payload.category.unwrap_or(Category::Apparel),
        base_cost: parse_base_cost(&payload.base_cost)?,
        is_active: payload.is_active.unwrap_or(true),
    };

    let created = state.store().create_product(product).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ProductDto::from(created))),
    ))
}
