//! Database operations for ratings and the per-blog rating average.

use std::collections::HashMap;

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;
use tracing::info;

use super::DbPool;
use crate::entity::rating::{self, ActiveModel, Entity as Rating};
use crate::error::{AppError, AppResult};

#[derive(Debug, FromQueryResult)]
struct AverageRow {
    blog_id: i32,
    avg_rating: Option<f64>,
}

impl DbPool {
    /// Create or overwrite the caller's rating for a blog.
    ///
    /// `value` must already be validated to the 0-6 range. Returns the stored
    /// rating; a second call for the same pair updates it in place.
    pub async fn rate(&self, user_id: i32, blog_id: i32, value: i32) -> AppResult<rating::Model> {
        self.require_blog(blog_id).await?;

        let rating = upsert_rating(self.connection(), user_id, blog_id, value)
            .await
            .map_err(|e| AppError::Database(format!("Failed to save rating: {}", e)))?;

        info!(user_id, blog_id, value, "Rated blog");
        Ok(rating)
    }

    /// Mean rating of a blog; 0 when nobody rated it.
    pub async fn average_rating(&self, blog_id: i32) -> AppResult<f64> {
        let averages = self.average_ratings(&[blog_id]).await?;
        Ok(averages.get(&blog_id).copied().unwrap_or(0.0))
    }

    /// Batch rating averages for multiple blogs.
    /// Returns a HashMap of blog_id -> mean; unrated blogs are absent.
    pub async fn average_ratings(&self, blog_ids: &[i32]) -> AppResult<HashMap<i32, f64>> {
        if blog_ids.is_empty() {
            return Ok(HashMap::new());
        }

        // AVG over an integer column is NUMERIC on Postgres; cast so it decodes as f64.
        let rows = Rating::find()
            .select_only()
            .column(rating::Column::BlogId)
            .column_as(Expr::cust("CAST(AVG(value) AS DOUBLE PRECISION)"), "avg_rating")
            .filter(rating::Column::BlogId.is_in(blog_ids.iter().copied()))
            .group_by(rating::Column::BlogId)
            .into_model::<AverageRow>()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to average ratings: {}", e)))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                row.avg_rating
                    .filter(|avg| avg.is_finite())
                    .map(|avg| (row.blog_id, avg))
            })
            .collect())
    }

    /// Number of ratings stored for a pair. Used to check the one-per-pair rule.
    pub async fn count_ratings(&self, user_id: i32, blog_id: i32) -> AppResult<u64> {
        Rating::find()
            .filter(rating::Column::UserId.eq(user_id))
            .filter(rating::Column::BlogId.eq(blog_id))
            .count(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count ratings: {}", e)))
    }
}

/// Insert the pair's rating, or overwrite its value when the unique
/// (user, blog) index already holds one. One statement, so concurrent
/// callers never see a conflict.
async fn upsert_rating(
    db: &DatabaseConnection,
    user_id: i32,
    blog_id: i32,
    value: i32,
) -> Result<rating::Model, DbErr> {
    Rating::insert(ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        blog_id: Set(blog_id),
        value: Set(value),
    })
    .on_conflict(
        OnConflict::columns([rating::Column::UserId, rating::Column::BlogId])
            .update_column(rating::Column::Value)
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    Rating::find()
        .filter(rating::Column::UserId.eq(user_id))
        .filter(rating::Column::BlogId.eq(blog_id))
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound(format!(
            "rating for user {} and blog {}",
            user_id, blog_id
        )))
}
