//! Blog pages: create, detail, favorite and rate.

use actix_web::{HttpResponse, web};
use tracing::info;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    BlogDetailResponse, BlogFormResponse, BlogSummary, BlogWithRating, Category,
    CreateBlogRequest, FavoriteResponse, RateRequest, RatingBounds, RatingResponse,
};
use crate::services::access;

/// Attach author usernames to blogs, preserving order.
pub(crate) async fn summarize_blogs(
    pool: &DbPool,
    items: &[BlogWithRating],
) -> AppResult<Vec<BlogSummary>> {
    let mut author_ids: Vec<i32> = items.iter().map(|item| item.blog.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let usernames = pool.usernames_by_ids(&author_ids).await?;

    Ok(items
        .iter()
        .map(|item| {
            let username = usernames
                .get(&item.blog.author_id)
                .cloned()
                .unwrap_or_default();
            BlogSummary::new(item, username)
        })
        .collect())
}

/// Load the caller's profile and stop unless it may publish.
async fn require_author(pool: &DbPool, user: &CurrentUser) -> AppResult<()> {
    let profile = pool
        .find_profile_by_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {}", user.user_id)))?;

    access::require_author(&profile)
}

/// Blog creation form metadata.
#[utoipa::path(
    get,
    path = "/blog/create",
    tag = "Blogs",
    responses(
        (status = 200, description = "Categories to choose from", body = BlogFormResponse),
        (status = 302, description = "Not logged in, redirect to /login"),
        (status = 303, description = "Not an author, redirect to / with a flash message"),
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn blog_form(user: CurrentUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    require_author(&pool, &user).await?;

    Ok(HttpResponse::Ok().json(BlogFormResponse {
        categories: Category::ALL.to_vec(),
    }))
}

/// Publish a new blog. Authors only.
///
/// The body is parsed after the author check so readers always get the
/// redirect, whatever they sent.
#[utoipa::path(
    post,
    path = "/blog/create",
    tag = "Blogs",
    request_body = CreateBlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogSummary),
        (status = 302, description = "Not logged in, redirect to /login"),
        (status = 303, description = "Not an author, redirect to / with a flash message"),
        (status = 400, description = "Malformed body or unknown category", body = crate::error::ErrorResponse),
        (status = 422, description = "Field validation failed", body = crate::error::ErrorResponse),
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn create_blog(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    require_author(&pool, &user).await?;

    let request: CreateBlogRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid blog: {}", e)))?;
    request.validate()?;

    let blog = pool.insert_blog(user.user_id, request).await?;
    let summary = BlogSummary::new(
        &BlogWithRating {
            blog,
            avg_rating: None,
        },
        user.username,
    );

    Ok(HttpResponse::Created().json(summary))
}

/// Blog detail with its average rating.
#[utoipa::path(
    get,
    path = "/blog/{id}",
    tag = "Blogs",
    params(
        ("id" = i32, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog detail", body = BlogDetailResponse),
        (status = 404, description = "Blog not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn blog_detail(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let blog_id = path.into_inner();

    let item = pool
        .get_blog_with_rating(blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog {}", blog_id)))?;

    let blog = summarize_blogs(&pool, std::slice::from_ref(&item))
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("Blog summary missing".to_string()))?;

    Ok(HttpResponse::Ok().json(BlogDetailResponse {
        blog,
        rating_form: RatingBounds::default(),
    }))
}

/// Add the blog to the caller's favorites. Repeat calls are no-ops.
#[utoipa::path(
    post,
    path = "/blog/{id}/favorite",
    tag = "Blogs",
    params(
        ("id" = i32, Path, description = "Blog id")
    ),
    responses(
        (status = 201, description = "Favorite created", body = FavoriteResponse),
        (status = 200, description = "Already a favorite", body = FavoriteResponse),
        (status = 302, description = "Not logged in, redirect to /login"),
        (status = 404, description = "Blog not found", body = crate::error::ErrorResponse),
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn add_favorite(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let blog_id = path.into_inner();
    let (favorite, created) = pool.add_favorite(user.user_id, blog_id).await?;

    let response = FavoriteResponse::new(favorite, created);
    if created {
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Ok().json(response))
    }
}

/// Rate the blog 0-6, replacing any earlier rating by the caller.
#[utoipa::path(
    post,
    path = "/blog/{id}/rate",
    tag = "Blogs",
    params(
        ("id" = i32, Path, description = "Blog id")
    ),
    request_body = RateRequest,
    responses(
        (status = 200, description = "Rating stored", body = RatingResponse),
        (status = 302, description = "Not logged in, redirect to /login"),
        (status = 404, description = "Blog not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Rating out of range", body = crate::error::ErrorResponse),
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn rate_blog(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
    body: web::Json<RateRequest>,
) -> AppResult<HttpResponse> {
    let blog_id = path.into_inner();
    let request = body.into_inner();
    request.validate()?;

    let rating = pool.rate(user.user_id, blog_id, request.value).await?;
    let avg_rating = pool.average_rating(blog_id).await?;

    info!(blog_id, avg_rating, "Blog average updated");
    Ok(HttpResponse::Ok().json(RatingResponse::new(rating, avg_rating)))
}

/// Configure blog routes. `/blog/create` must precede `/blog/{id}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/blog/create")
            .route(web::get().to(blog_form))
            .route(web::post().to(create_blog)),
    )
    .service(web::resource("/blog/{id}").route(web::get().to(blog_detail)))
    .service(web::resource("/blog/{id}/favorite").route(web::post().to(add_favorite)))
    .service(web::resource("/blog/{id}/rate").route(web::post().to(rate_blog)));
}
