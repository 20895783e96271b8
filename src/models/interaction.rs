//! Favorite and rating DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{favorite, rating};

/// Rating form.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RateRequest {
    /// Whole number from 0 to 6.
    #[validate(range(min = 0, max = 6, message = "Rating must be between 0 and 6"))]
    pub value: i32,
}

/// Result of adding a favorite.
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteResponse {
    pub id: i32,
    pub user_id: i32,
    pub blog_id: i32,
    pub added_at: DateTime<Utc>,
    /// False when the blog was already a favorite.
    pub created: bool,
    pub message: String,
}

impl FavoriteResponse {
    pub fn new(model: favorite::Model, created: bool) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            blog_id: model.blog_id,
            added_at: model.added_at,
            created,
            message: "Added to favorites!".to_string(),
        }
    }
}

/// Result of rating a blog.
#[derive(Debug, Serialize, ToSchema)]
pub struct RatingResponse {
    pub id: i32,
    pub user_id: i32,
    pub blog_id: i32,
    pub value: i32,
    /// Blog average after this rating.
    pub avg_rating: f64,
    pub message: String,
}

impl RatingResponse {
    pub fn new(model: rating::Model, avg_rating: f64) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            blog_id: model.blog_id,
            value: model.value,
            avg_rating,
            message: "Rating submitted!".to_string(),
        }
    }
}
