//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::api::types::{LoginRequest, SignupRequest};
use crate::config::SecurityConfig;
use crate::constants::limits;
use crate::db::{NewUser, Store, User};
use crate::domain::Principal;
use crate::entities::users::Role;
use crate::services::auth_service::{AuthError, AuthService};
use crate::services::fields;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn validate_signup(&self, request: SignupRequest) -> Result<NewUser, AuthError> {
        let email = fields::email(&request.email).map_err(AuthError::Validation)?;

        if request.password.chars().count() < self.security.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.security.min_password_length
            )));
        }
        if request.password != request.password_confirm {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        Ok(NewUser {
            email,
            password: request.password,
            full_name: fields::required("Full name", &request.full_name, limits::FULL_NAME_MAX)
                .map_err(AuthError::Validation)?,
            phone: fields::required("Phone", &request.phone, limits::PHONE_MAX)
                .map_err(AuthError::Validation)?,
            instagram: fields::optional(
                "Instagram",
                request.instagram.as_deref(),
                limits::INSTAGRAM_MAX,
            )
            .map_err(AuthError::Validation)?,
            role: Role::Creator,
        })
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn signup(&self, request: SignupRequest) -> Result<User, AuthError> {
        let new_user = self.validate_signup(request)?;

        if self.store.get_user_by_email(&new_user.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = self.store.create_user(new_user, &self.security).await?;
        info!(user_id = %user.id, email = %user.email, "Creator account registered");
        Ok(user)
    }

    async fn login(&self, request: LoginRequest) -> Result<User, AuthError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        self.store
            .verify_user_password(&request.email, &request.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn verify_api_key(&self, api_key: &str) -> Result<Option<Principal>, AuthError> {
        let user = self.store.verify_api_key(api_key).await?;
        Ok(user.map(Principal::from))
    }

    async fn get_principal(&self, id: Uuid) -> Result<Option<Principal>, AuthError> {
        let user = self.store.get_user(id).await?;
        Ok(user.map(Principal::from))
    }
}
