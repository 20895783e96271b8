//! Home feed.

use actix_web::{HttpRequest, HttpResponse, web};

use super::blogs::summarize_blogs;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{Category, FeedQuery, FeedResponse};
use crate::services::flash;

/// Home feed: all blogs matching the filters, newest first.
#[utoipa::path(
    get,
    path = "/",
    tag = "Feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Filtered blogs with filter choices", body = FeedResponse),
        (status = 400, description = "Unknown category, author or date", body = crate::error::ErrorResponse),
    )
)]
pub async fn home(
    req: HttpRequest,
    pool: web::Data<DbPool>,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let filters = query.into_inner().into_filters()?;

    let items = pool.build_feed(&filters).await?;
    let blogs = summarize_blogs(&pool, &items).await?;
    let authors = pool.list_author_profiles().await?;
    let (messages, clear_flash) = flash::take_messages(&req);

    let mut response = HttpResponse::Ok();
    if let Some(cookie) = clear_flash {
        response.cookie(cookie);
    }

    Ok(response.json(FeedResponse {
        blogs,
        authors,
        categories: Category::ALL.to_vec(),
        messages,
    }))
}

/// Configure feed routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)));
}
