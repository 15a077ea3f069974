use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{DesignProductRow, DesignStats, PlatformStats, User};
use crate::entities::designs::{self, DesignStatus};
use crate::entities::products::{self, Category};
use crate::entities::users::Role;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Renders hundredths as a fixed two-decimal amount, e.g. `150000.00`.
#[must_use]
pub fn format_cost(hundredths: i64) -> String {
    let sign = if hundredths < 0 { "-" } else { "" };
    let abs = hundredths.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub instagram: Option<String>,
    pub role: Role,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            instagram: user.instagram,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BankDto {
    pub bank_name: Option<String>,
    pub bank_number: Option<String>,
    pub bank_holder: Option<String>,
}

impl From<User> for BankDto {
    fn from(user: User) -> Self {
        Self {
            bank_name: user.bank_name,
            bank_number: user.bank_number,
            bank_holder: user.bank_holder,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub user: UserDto,
    pub api_key: String,
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct ProductDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub base_cost: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<products::Model> for ProductDto {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            base_cost: format_cost(model.base_cost),
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DesignDto {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub image: String,
    pub status: DesignStatus,
    pub reject_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<designs::Model> for DesignDto {
    fn from(model: designs::Model) -> Self {
        Self {
            id: model.id,
            creator_id: model.creator_id,
            title: model.title,
            description: model.description,
            image: model.image,
            status: model.status,
            reject_reason: model.reject_reason,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DesignProductDto {
    pub id: Uuid,
    pub sku: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub category: Option<Category>,
    pub base_cost: Option<String>,
    pub created_at: String,
}

impl From<DesignProductRow> for DesignProductDto {
    fn from(row: DesignProductRow) -> Self {
        Self {
            id: row.id,
            sku: row.sku,
            product_id: row.product_id,
            product_name: row.product_name,
            category: row.category,
            base_cost: row.base_cost.map(format_cost),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DesignDetailDto {
    #[serde(flatten)]
    pub design: DesignDto,
    pub products: Vec<DesignProductDto>,
}

/// What the approve/reject/delete confirmation dialogs show.
#[derive(Debug, Serialize)]
pub struct DesignSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub status: DesignStatus,
    pub product_count: u64,
}

#[derive(Debug, Serialize)]
pub struct SubmissionDto {
    pub message: String,
    pub design: DesignDetailDto,
}

#[derive(Debug, Serialize)]
pub struct ReviewDto {
    pub message: String,
    pub design: DesignDto,
}

#[derive(Debug, Serialize)]
pub struct DeletionDto {
    pub message: String,
    pub id: Uuid,
    pub image_removed: bool,
}

#[derive(Debug, Serialize)]
pub struct CreatorDashboardDto {
    pub stats: DesignStats,
    pub recent_designs: Vec<DesignDto>,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboardDto {
    pub stats: PlatformStats,
    pub pending_designs: Vec<DesignDto>,
    pub recent_designs: Vec<DesignDto>,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub instagram: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile edit. An `email` field, if sent, is ignored.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub instagram: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BankRequest {
    pub bank_name: Option<String>,
    pub bank_number: Option<String>,
    pub bank_holder: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RejectForm {
    pub reject_reason: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DesignListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    pub base_cost: String,
    #[serde(default)]
    pub is_active: Option<bool>,
}
