use uuid::Uuid;

use super::ApiError;
use crate::constants::limits;

pub fn parse_id(resource: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::validation(format!("Invalid {resource} ID: {raw}")))
}

/// Parses a decimal amount with at most two fractional digits into hundredths.
pub fn parse_base_cost(raw: &str) -> Result<i64, ApiError> {
    let invalid = || {
        ApiError::validation(format!(
            "Invalid base cost: {raw}. Use a non-negative amount with up to 2 decimals"
        ))
    };

    let raw_trimmed = raw.trim();
    let (whole, fraction) = raw_trimmed.split_once('.').unwrap_or((raw_trimmed, ""));

    if whole.is_empty()
        || !whole.chars().all(|c| c.is_ascii_digit())
        || fraction.len() > 2
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: i64 = whole.parse().map_err(|_| invalid())?;
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<2}").parse().map_err(|_| invalid())?
    };

    whole
        .checked_mul(100)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(invalid)
}

pub fn validate_product_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Product name cannot be empty"));
    }

    if trimmed.chars().count() > limits::PRODUCT_NAME_MAX {
        return Err(ApiError::validation(format!(
            "Product name must be {} characters or less",
            limits::PRODUCT_NAME_MAX
        )));
    }

    Ok(trimmed.to_string())
}
