//! Create-admin command handler

use crate::config::Config;
use crate::db::{NewUser, Store, User};
use crate::entities::users::Role;

const ADMIN_PHONE: &str = "08123456789";

#[derive(Debug)]
pub enum AdminOutcome {
    Created(User),
    AlreadyExists,
}

/// Inserts an admin account unless the email is already registered.
pub async fn create_admin(
    store: &Store,
    config: &Config,
    email: &str,
    password: &str,
    name: &str,
) -> anyhow::Result<AdminOutcome> {
    if store.get_user_by_email(email).await?.is_some() {
        return Ok(AdminOutcome::AlreadyExists);
    }

    let user = store
        .create_user(
            NewUser {
                email: email.trim().to_string(),
                password: password.to_string(),
                full_name: name.trim().to_string(),
                phone: ADMIN_PHONE.to_string(),
                instagram: None,
                role: Role::Admin,
            },
            &config.security,
        )
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Admin account created");
    Ok(AdminOutcome::Created(user))
}

pub async fn cmd_create_admin(
    config: &Config,
    email: &str,
    password: &str,
    name: &str,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    match create_admin(&store, config, email, password, name).await? {
        AdminOutcome::Created(user) => {
            println!("✓ Created admin user: {}", user.email);
            println!("  Password: {password}");
            println!("  API key:  {}", user.api_key);
        }
        AdminOutcome::AlreadyExists => {
            println!("User {email} already exists");
        }
    }

    Ok(())
}
