//! Database operations for profiles.

use sea_orm::*;
use tracing::info;

use super::DbPool;
use crate::entity::profile::{self, ActiveModel, Entity as Profile};
use crate::entity::user;
use crate::error::{AppError, AppResult};
use crate::models::{AuthorSummary, UpdateProfileRequest};

impl DbPool {
    /// Get the profile belonging to a user.
    pub async fn find_profile_by_user(&self, user_id: i32) -> AppResult<Option<profile::Model>> {
        Profile::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to find profile: {}", e)))
    }

    /// Get a profile together with its user, by profile id.
    pub async fn get_profile_with_user(
        &self,
        profile_id: i32,
    ) -> AppResult<Option<(profile::Model, user::Model)>> {
        let row = Profile::find_by_id(profile_id)
            .find_also_related(user::Entity)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get profile: {}", e)))?;

        Ok(row.and_then(|(profile, user)| user.map(|u| (profile, u))))
    }

    /// Replace the editable fields of a user's profile.
    pub async fn update_profile(
        &self,
        user_id: i32,
        update: UpdateProfileRequest,
    ) -> AppResult<profile::Model> {
        let profile = self
            .find_profile_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile for user {}", user_id)))?;

        let mut active: ActiveModel = profile.into();
        active.bio = Set(update.bio);
        active.profile_pic = Set(update.profile_pic);
        active.social_link = Set(update.social_link);

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update profile: {}", e)))?;

        info!(user_id, profile_id = updated.id, "Updated profile");
        Ok(updated)
    }

    /// All author profiles with their usernames, for the feed's author filter.
    pub async fn list_author_profiles(&self) -> AppResult<Vec<AuthorSummary>> {
        let rows = Profile::find()
            .filter(profile::Column::IsAuthor.eq(true))
            .find_also_related(user::Entity)
            .order_by_asc(profile::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list authors: {}", e)))?;

        Ok(rows
            .into_iter()
            .filter_map(|(profile, user)| {
                user.map(|u| AuthorSummary {
                    profile_id: profile.id,
                    user_id: u.id,
                    username: u.username,
                })
            })
            .collect())
    }
}
