//! Account registration and credential checks.

use actix_web::web;
use tracing::warn;
use validator::Validate;

use crate::auth::password;
use crate::db::DbPool;
use crate::db::users::NewUser;
use crate::entity::{profile, user};
use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, RegisterRequest};

/// Validate the form, hash the password and create the user with its profile.
pub async fn register(
    pool: &DbPool,
    request: RegisterRequest,
) -> AppResult<(user::Model, profile::Model)> {
    request.validate()?;

    if pool.find_user_by_username(&request.username).await?.is_some() {
        return Err(AppError::field(
            "username",
            "A user with that username already exists.",
        ));
    }

    let RegisterRequest {
        username,
        email,
        password1,
        is_author,
        ..
    } = request;

    let password_hash = web::block(move || password::hash_password(&password1)).await??;

    pool.create_user_with_profile(NewUser {
        username,
        email,
        password_hash,
        is_author,
    })
    .await
}

/// Check credentials. `None` for an unknown user or a wrong password.
pub async fn authenticate(pool: &DbPool, request: LoginRequest) -> AppResult<Option<user::Model>> {
    let LoginRequest { username, password } = request;

    let Some(user) = pool.find_user_by_username(&username).await? else {
        web::block(move || password::verify_dummy(&password)).await?;
        warn!(username = %username, "Login failed: unknown user");
        return Ok(None);
    };

    let hash = user.password_hash.clone();
    let matches = web::block(move || password::verify_password(&password, &hash)).await?;

    if matches {
        Ok(Some(user))
    } else {
        warn!(user_id = user.id, "Login failed: wrong password");
        Ok(None)
    }
}
