//! Public author pages.

use actix_web::{HttpResponse, web};

use super::blogs::summarize_blogs;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{AuthorDetailResponse, ProfileResponse};

/// A profile and every blog its user wrote. `id` is the profile id.
#[utoipa::path(
    get,
    path = "/author/{id}",
    tag = "Authors",
    params(
        ("id" = i32, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Author profile and blogs", body = AuthorDetailResponse),
        (status = 404, description = "Profile not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn author_detail(
    pool: web::Data<DbPool>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let profile_id = path.into_inner();

    let (profile, user) = pool
        .get_profile_with_user(profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {}", profile_id)))?;

    let items = pool.list_blogs_by_author(user.id).await?;
    let blogs = summarize_blogs(&pool, &items).await?;

    Ok(HttpResponse::Ok().json(AuthorDetailResponse {
        author: ProfileResponse::public(profile, &user),
        blogs,
    }))
}

/// Configure author routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/author/{id}").route(web::get().to(author_detail)));
}
