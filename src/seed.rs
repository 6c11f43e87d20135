use chrono::Utc;

use crate::{
    auth,
    config::AdminSeed,
    error::{AppError, AppResult},
    models::{Role, User},
    repository::Repository,
};

/// bootstrap_admin
///
/// Creates the configured administrator if no account with that email exists yet.
/// An existing account is left untouched, whatever its role. Returns whether a new
/// account was created.
pub async fn bootstrap_admin(repo: &dyn Repository, seed: &AdminSeed) -> AppResult<bool> {
    if repo.find_user_by_email(&seed.email).await?.is_some() {
        tracing::debug!(email = %seed.email, "Admin account already present");
        return Ok(false);
    }

    let password_hash = auth::hash_password(&seed.password)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
    let admin = repo
        .insert_user(User::new(
            seed.name.clone(),
            &seed.email,
            password_hash,
            Role::Admin,
            Utc::now(),
        ))
        .await?;

    tracing::info!(user_id = %admin.id, email = %admin.email, "Bootstrapped admin account");
    Ok(true)
}
