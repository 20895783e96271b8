//! Database operations for blogs, including the home feed query.

use chrono::{Duration, NaiveTime, Utc};
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::*;
use tracing::info;

use super::DbPool;
use crate::entity::blog::{self, ActiveModel, Entity as Blog};
use crate::error::{AppError, AppResult};
use crate::models::{BlogWithRating, CreateBlogRequest, FeedFilters};

impl DbPool {
    /// Insert a new blog owned by `author_id`.
    pub async fn insert_blog(
        &self,
        author_id: i32,
        request: CreateBlogRequest,
    ) -> AppResult<blog::Model> {
        let now = Utc::now();

        let model = ActiveModel {
            id: NotSet,
            title: Set(request.title),
            author_id: Set(author_id),
            category: Set(request.category),
            body: Set(request.body),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let blog = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert blog: {}", e)))?;

        info!(blog_id = blog.id, author_id, category = %blog.category, "Created blog");
        Ok(blog)
    }

    /// Get blog by ID.
    pub async fn get_blog_by_id(&self, id: i32) -> AppResult<Option<blog::Model>> {
        Blog::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get blog: {}", e)))
    }

    /// Get blog by ID, or `NotFound`.
    pub async fn require_blog(&self, id: i32) -> AppResult<blog::Model> {
        self.get_blog_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog {}", id)))
    }

    /// Get a blog with its average rating attached.
    pub async fn get_blog_with_rating(&self, id: i32) -> AppResult<Option<BlogWithRating>> {
        let Some(blog) = self.get_blog_by_id(id).await? else {
            return Ok(None);
        };

        let averages = self.average_ratings(&[blog.id]).await?;
        Ok(Some(BlogWithRating {
            avg_rating: averages.get(&blog.id).copied(),
            blog,
        }))
    }

    /// Home feed: every blog matching all active filters, newest first,
    /// each with its rating average.
    pub async fn build_feed(&self, filters: &FeedFilters) -> AppResult<Vec<BlogWithRating>> {
        let mut select = Blog::find();

        if let Some(category) = filters.category {
            select = select.filter(blog::Column::Category.eq(category));
        }

        if let Some(author_id) = filters.author_id {
            select = select.filter(blog::Column::AuthorId.eq(author_id));
        }

        // Calendar day in UTC: [midnight, next midnight)
        if let Some(date) = filters.date {
            let start = date.and_time(NaiveTime::MIN).and_utc();
            let end = start + Duration::days(1);
            select = select
                .filter(blog::Column::CreatedAt.gte(start))
                .filter(blog::Column::CreatedAt.lt(end));
        }

        if let Some(ref search) = filters.search {
            let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
            select = select.filter(
                Condition::any()
                    .add(lower_like(blog::Column::Title, &pattern))
                    .add(lower_like(blog::Column::Body, &pattern)),
            );
        }

        let blogs = select
            .order_by_desc(blog::Column::CreatedAt)
            .order_by_desc(blog::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to query feed: {}", e)))?;

        self.attach_ratings(blogs).await
    }

    /// All blogs written by one user, newest first.
    pub async fn list_blogs_by_author(&self, author_id: i32) -> AppResult<Vec<BlogWithRating>> {
        self.build_feed(&FeedFilters {
            author_id: Some(author_id),
            ..FeedFilters::default()
        })
        .await
    }

    /// Hard delete a blog. Its favorites and ratings go with it.
    pub async fn delete_blog(&self, id: i32) -> AppResult<()> {
        let result = Blog::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete blog: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Blog {}", id)));
        }

        info!(blog_id = id, "Deleted blog");
        Ok(())
    }

    async fn attach_ratings(&self, blogs: Vec<blog::Model>) -> AppResult<Vec<BlogWithRating>> {
        let ids: Vec<i32> = blogs.iter().map(|b| b.id).collect();
        let averages = self.average_ratings(&ids).await?;

        Ok(blogs
            .into_iter()
            .map(|blog| BlogWithRating {
                avg_rating: averages.get(&blog.id).copied(),
                blog,
            })
            .collect())
    }
}

/// `LOWER(column) LIKE pattern ESCAPE '!'`
fn lower_like(column: blog::Column, pattern: &str) -> Expr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('!'))
}

/// Escape LIKE wildcards so user text matches literally (escape char `!`).
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '!') {
            escaped.push('!');
        }
        escaped.push(c);
    }
    escaped
}
