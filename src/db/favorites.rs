//! Database operations for favorites.

use chrono::Utc;
use sea_orm::*;
use tracing::info;

use super::DbPool;
use crate::entity::favorite::{self, ActiveModel, Entity as Favorite};
use crate::error::{AppError, AppResult};

impl DbPool {
    /// Mark a blog as a favorite of the user, once.
    ///
    /// Returns the favorite and whether this call created it. Repeated calls
    /// return the existing row unchanged.
    pub async fn add_favorite(
        &self,
        user_id: i32,
        blog_id: i32,
    ) -> AppResult<(favorite::Model, bool)> {
        self.require_blog(blog_id).await?;

        let (favorite, created) = insert_or_get_favorite(self.connection(), user_id, blog_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to save favorite: {}", e)))?;

        if created {
            info!(user_id, blog_id, favorite_id = favorite.id, "Added favorite");
        }

        Ok((favorite, created))
    }

    /// Number of favorites stored for a pair.
    pub async fn count_favorites(&self, user_id: i32, blog_id: i32) -> AppResult<u64> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::BlogId.eq(blog_id))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count favorites: {}", e)))
    }
}

/// Insert the pair's favorite unless the unique (user, blog) index already
/// holds one, then read back whichever row won.
async fn insert_or_get_favorite(
    db: &DatabaseConnection,
    user_id: i32,
    blog_id: i32,
) -> Result<(favorite::Model, bool), DbErr> {
    let inserted = Favorite::insert(ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        blog_id: Set(blog_id),
        added_at: Set(Utc::now()),
    })
    .on_conflict_do_nothing_on([favorite::Column::UserId, favorite::Column::BlogId])
    .exec_without_returning(db)
    .await?;

    let created = matches!(inserted, TryInsertResult::Inserted(rows) if rows > 0);

    let favorite = Favorite::find()
        .filter(favorite::Column::UserId.eq(user_id))
        .filter(favorite::Column::BlogId.eq(blog_id))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound(format!(
            "favorite for user {} and blog {}",
            user_id, blog_id
        )))?;

    Ok((favorite, created))
}
