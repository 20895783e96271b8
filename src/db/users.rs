//! Database operations for users.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::*;
use tracing::info;

use super::{DbPool, is_unique_violation};
use crate::entity::profile;
use crate::entity::user::{self, Entity as User};
use crate::error::{AppError, AppResult};

/// A user record without credentials, ready for a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_author: bool,
}

impl DbPool {
    /// Create a user and its profile in one transaction.
    ///
    /// A taken username is reported as a field error on `username`.
    pub async fn create_user_with_profile(
        &self,
        new_user: NewUser,
    ) -> AppResult<(user::Model, profile::Model)> {
        let txn = self
            .connection()
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        let now = Utc::now();
        let user_model = user::ActiveModel {
            id: NotSet,
            username: Set(new_user.username.clone()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            created_at: Set(now),
        };

        let user = match user_model.insert(&txn).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                return Err(AppError::field(
                    "username",
                    "A user with that username already exists.",
                ));
            }
            Err(e) => return Err(AppError::Database(format!("Failed to insert user: {}", e))),
        };

        let profile = profile::ActiveModel {
            id: NotSet,
            user_id: Set(user.id),
            is_author: Set(new_user.is_author),
            bio: Set(None),
            profile_pic: Set(None),
            social_link: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert profile: {}", e)))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit user: {}", e)))?;

        info!(
            user_id = user.id,
            username = %user.username,
            is_author = profile.is_author,
            "Registered user"
        );

        Ok((user, profile))
    }

    /// Find a user by exact username.
    pub async fn find_user_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find user: {}", e)))
    }

    /// Find a user by ID.
    pub async fn find_user_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find user: {}", e)))
    }

    /// Batch lookup of usernames. Returns a HashMap of user_id -> username.
    pub async fn usernames_by_ids(&self, ids: &[i32]) -> AppResult<HashMap<i32, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = User::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load usernames: {}", e)))?;

        Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
    }

    /// Hard delete a user. Profile, blogs, favorites and ratings go with it.
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        let result = User::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete user: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("User {}", id)));
        }

        info!(user_id = id, "Deleted user");
        Ok(())
    }
}
