//! `SeaORM` implementation of the `AccountService` trait.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::api::types::{BankDto, BankRequest, ProfileRequest, UserDto};
use crate::constants::limits;
use crate::db::{BankUpdate, ProfileUpdate, Store, User};
use crate::services::account_service::{AccountError, AccountService};
use crate::services::fields;

pub struct SeaOrmAccountService {
    store: Store,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn user(&self, user_id: Uuid) -> Result<User, AccountError> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(AccountError::NotFound(user_id))
    }
}

fn profile_update(request: &ProfileRequest) -> Result<ProfileUpdate, AccountError> {
    Ok(ProfileUpdate {
        full_name: fields::required("Full name", &request.full_name, limits::FULL_NAME_MAX)
            .map_err(AccountError::Validation)?,
        phone: fields::required("Phone", &request.phone, limits::PHONE_MAX)
            .map_err(AccountError::Validation)?,
        instagram: fields::optional(
            "Instagram",
            request.instagram.as_deref(),
            limits::INSTAGRAM_MAX,
        )
        .map_err(AccountError::Validation)?,
    })
}

fn bank_update(request: &BankRequest) -> Result<BankUpdate, AccountError> {
    let field = |label: &str, value: &Option<String>, max: usize| {
        fields::optional(label, value.as_deref(), max).map_err(AccountError::Validation)
    };

    Ok(BankUpdate {
        bank_name: field("Bank name", &request.bank_name, limits::BANK_NAME_MAX)?,
        bank_number: field("Account number", &request.bank_number, limits::BANK_NUMBER_MAX)?,
        bank_holder: field("Account holder", &request.bank_holder, limits::BANK_HOLDER_MAX)?,
    })
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn profile(&self, user_id: Uuid) -> Result<UserDto, AccountError> {
        Ok(UserDto::from(self.user(user_id).await?))
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        request: ProfileRequest,
    ) -> Result<UserDto, AccountError> {
        let update = profile_update(&request)?;
        self.user(user_id).await?;

        let user = self.store.update_user_profile(user_id, update).await?;
        info!(user_id = %user_id, "Profile updated");
        Ok(UserDto::from(user))
    }

    async fn bank(&self, user_id: Uuid) -> Result<BankDto, AccountError> {
        Ok(BankDto::from(self.user(user_id).await?))
    }

    async fn update_bank(
        &self,
        user_id: Uuid,
        request: BankRequest,
    ) -> Result<BankDto, AccountError> {
        let update = bank_update(&request)?;
        self.user(user_id).await?;

        let user = self.store.update_user_bank(user_id, update).await?;
        info!(user_id = %user_id, "Bank details updated");
        Ok(BankDto::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_requires_name_and_phone() {
        let request = ProfileRequest {
            full_name: "  ".to_string(),
            phone: "0812".to_string(),
            instagram: None,
        };
        assert!(matches!(
            profile_update(&request),
            Err(AccountError::Validation(_))
        ));

        let request = ProfileRequest {
            full_name: "Rina".to_string(),
            phone: " 0812 ".to_string(),
            instagram: Some(String::new()),
        };
        let update = profile_update(&request).unwrap();
        assert_eq!(update.phone, "0812");
        assert_eq!(update.instagram, None);
    }

    #[test]
    fn test_bank_update_blank_becomes_none() {
        let update = bank_update(&BankRequest {
            bank_name: Some("BCA".to_string()),
            bank_number: Some("   ".to_string()),
            bank_holder: None,
        })
        .unwrap();

        assert_eq!(update.bank_name.as_deref(), Some("BCA"));
        assert_eq!(update.bank_number, None);
        assert_eq!(update.bank_holder, None);
    }

    #[test]
    fn test_bank_update_length_limit() {
        let result = bank_update(&BankRequest {
            bank_number: Some("9".repeat(31)),
            ..BankRequest::default()
        });
        assert!(matches!(result, Err(AccountError::Validation(_))));
    }
}
