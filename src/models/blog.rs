//! Blog domain models, feed filters and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::account::ProfileResponse;
use super::category::Category;
use super::{MAX_RATING, MIN_RATING};
use crate::entity::blog;
use crate::error::{AppError, AppResult};

/// Query value that disables the category and author filters.
pub const ALL_SENTINEL: &str = "All";

/// Raw feed query string parameters, exactly as sent by the browser.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Category name, or "All".
    pub category: Option<String>,
    /// Author user id, or "All".
    pub author: Option<String>,
    /// Creation date (YYYY-MM-DD).
    pub date: Option<String>,
    /// Case-insensitive text searched in title and body.
    pub search: Option<String>,
}

impl FeedQuery {
    /// Parse into typed filters, rejecting values that can never match.
    pub fn into_filters(self) -> AppResult<FeedFilters> {
        let category = match active(self.category) {
            Some(value) => Some(value.parse::<Category>()?),
            None => None,
        };

        let author_id = match active(self.author) {
            Some(value) => Some(value.parse::<i32>().map_err(|_| {
                AppError::InvalidInput(format!("author must be a user id or 'All', got '{}'", value))
            })?),
            None => None,
        };

        let date = match self.date.filter(|d| !d.is_empty()) {
            Some(value) => Some(NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| {
                AppError::InvalidInput(format!("date must be YYYY-MM-DD, got '{}'", value))
            })?),
            None => None,
        };

        let search = self.search.filter(|s| !s.is_empty());

        Ok(FeedFilters {
            category,
            author_id,
            date,
            search,
        })
    }
}

/// Empty values and the "All" sentinel both mean "no filter".
fn active(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != ALL_SENTINEL)
}

/// Typed feed filters. Every field narrows the result; `None` disables it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedFilters {
    pub category: Option<Category>,
    pub author_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub search: Option<String>,
}

/// A blog with the mean of its ratings attached.
#[derive(Debug, Clone)]
pub struct BlogWithRating {
    pub blog: blog::Model,
    /// `None` when nobody rated the blog yet.
    pub avg_rating: Option<f64>,
}

impl BlogWithRating {
    /// Average as presented to readers: unrated blogs show 0.
    pub fn display_rating(&self) -> f64 {
        self.avg_rating.filter(|avg| avg.is_finite()).unwrap_or(0.0)
    }
}

/// Blog as listed in the feed and on detail pages.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BlogSummary {
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub author_username: String,
    pub category: Category,
    pub body: String,
    pub avg_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogSummary {
    /// Build from a stored blog; `author_username` comes from a separate lookup.
    pub fn new(item: &BlogWithRating, author_username: String) -> Self {
        Self {
            id: item.blog.id,
            title: item.blog.title.clone(),
            author_id: item.blog.author_id,
            author_username,
            category: item.blog.category,
            body: item.blog.body.clone(),
            avg_rating: item.display_rating(),
            created_at: item.blog.created_at,
            updated_at: item.blog.updated_at,
        }
    }
}

/// An author offered in the feed's author filter.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorSummary {
    pub profile_id: i32,
    /// Value to send as the `author` filter.
    pub user_id: i32,
    pub username: String,
}

/// Home page payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeedResponse {
    pub blogs: Vec<BlogSummary>,
    pub authors: Vec<AuthorSummary>,
    pub categories: Vec<Category>,
    /// Flash messages left by a previous redirect.
    pub messages: Vec<String>,
}

/// Accepted range for the rating form.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RatingBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for RatingBounds {
    fn default() -> Self {
        Self {
            min: MIN_RATING,
            max: MAX_RATING,
        }
    }
}

/// Blog detail page payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct BlogDetailResponse {
    pub blog: BlogSummary,
    pub rating_form: RatingBounds,
}

/// Blog creation form metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct BlogFormResponse {
    pub categories: Vec<Category>,
}

/// Create blog request.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters"))]
    pub title: String,
    pub category: Category,
    #[validate(length(min = 1, message = "Body cannot be empty"))]
    pub body: String,
}

/// Author page payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorDetailResponse {
    pub author: ProfileResponse,
    pub blogs: Vec<BlogSummary>,
}
