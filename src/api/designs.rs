use axum::{
    Extension, Form, Json,
    extract::{Multipart, Path, Query, State, multipart::MultipartError, rejection::FormRejection},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::validation::parse_id;
use super::{
    ApiError, ApiResponse, AppState, DeletionDto, DesignDetailDto, DesignDto, DesignListQuery,
    DesignSummaryDto, ProductDto, RejectForm, ReviewDto, SubmissionDto,
};
use crate::domain::Principal;
use crate::entities::designs::DesignStatus;
use crate::services::{DesignSubmission, ImageUpload};

#[derive(Serialize)]
pub struct UploadFormDto {
    pub products: Vec<ProductDto>,
    pub max_upload_bytes: usize,
}

fn multipart_error(err: &MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge(format!("Upload is too large: {}", err.body_text()));
    }
    ApiError::validation(format!("Invalid upload: {}", err.body_text()))
}

/// Reads the upload form. Unknown fields are ignored.
async fn read_submission(mut multipart: Multipart) -> Result<DesignSubmission, ApiError> {
    let mut submission = DesignSubmission {
        title: String::new(),
        description: None,
        image: None,
        product_ids: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => submission.title = field.text().await.map_err(|e| multipart_error(&e))?,
            "description" => {
                submission.description =
                    Some(field.text().await.map_err(|e| multipart_error(&e))?);
            }
            "image_file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                submission.image = Some(ImageUpload {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "products" => {
                let raw = field.text().await.map_err(|e| multipart_error(&e))?;
                if !raw.trim().is_empty() {
                    submission.product_ids.push(parse_id("product", &raw)?);
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// GET /designs/?status=
pub async fn list_designs(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<DesignListQuery>,
) -> Result<Json<ApiResponse<Vec<DesignDto>>>, ApiError> {
    let status = query.status.as_deref().and_then(DesignStatus::parse_filter);
    let designs = state.shared.design_service.list(&principal, status).await?;
    Ok(Json(ApiResponse::success(designs)))
}

/// GET /designs/upload/
pub async fn upload_form(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<UploadFormDto>>, ApiError> {
    let products = state
        .store()
        .list_active_products()
        .await?
        .into_iter()
        .map(ProductDto::from)
        .collect();
    let max_upload_bytes = state.config().read().await.storage.max_upload_bytes;

    Ok(Json(ApiResponse::success(UploadFormDto {
        products,
        max_upload_bytes,
    })))
}

/// POST /designs/upload/
pub async fn upload_design(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionDto>>), ApiError> {
    let submission = read_submission(multipart).await?;
    let result = state
        .shared
        .design_service
        .submit(&principal, submission)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(result))))
}

/// GET /designs/{id}/
pub async fn get_design(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DesignDetailDto>>, ApiError> {
    let id: Uuid = parse_id("design", &id)?;
    let design = state.shared.design_service.detail(&principal, id).await?;
    Ok(Json(ApiResponse::success(design)))
}

/// POST /designs/{id}/approve/
pub async fn approve_design(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    let id = parse_id("design", &id)?;
    let result = state.shared.design_service.approve(&principal, id).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /designs/{id}/reject/
pub async fn reject_target(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DesignSummaryDto>>, ApiError> {
    let id = parse_id("design", &id)?;
    let summary = state
        .shared
        .design_service
        .review_target(&principal, id)
        .await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// POST /designs/{id}/reject/
/// A missing or unreadable form body rejects with an empty reason.
pub async fn reject_design(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    form: Result<Form<RejectForm>, FormRejection>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    let id = parse_id("design", &id)?;
    let reason = form.map(|Form(f)| f.reject_reason).unwrap_or_default();

    let result = state
        .shared
        .design_service
        .reject(&principal, id, reason)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// GET /designs/{id}/delete/
pub async fn delete_target(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DesignSummaryDto>>, ApiError> {
    let id = parse_id("design", &id)?;
    let summary = state
        .shared
        .design_service
        .delete_target(&principal, id)
        .await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// POST /designs/{id}/delete/
pub async fn delete_design(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletionDto>>, ApiError> {
    let id = parse_id("design", &id)?;
    let result = state.shared.design_service.delete(&principal, id).await?;
    Ok(Json(ApiResponse::success(result)))
}
