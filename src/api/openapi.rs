//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Foodblog Server",
        version = "0.1.0",
        description = "Recipe blogs by cuisine: browse and filter the feed, publish as an author, favorite and rate"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Feed
        api::feed::home,
        // Accounts
        api::accounts::register,
        api::accounts::login,
        api::accounts::logout,
        api::accounts::get_profile,
        api::accounts::update_profile,
        // Blogs
        api::blogs::blog_form,
        api::blogs::create_blog,
        api::blogs::blog_detail,
        api::blogs::add_favorite,
        api::blogs::rate_blog,
        // Authors
        api::authors::author_detail,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Feed and blogs
            models::Category,
            models::BlogSummary,
            models::AuthorSummary,
            models::FeedResponse,
            models::RatingBounds,
            models::BlogDetailResponse,
            models::BlogFormResponse,
            models::CreateBlogRequest,
            models::AuthorDetailResponse,
            // Interactions
            models::RateRequest,
            models::FavoriteResponse,
            models::RatingResponse,
            // Accounts
            models::RegisterRequest,
            models::LoginRequest,
            models::SessionResponse,
            models::UpdateProfileRequest,
            models::ProfileResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Feed", description = "Filtered home feed"),
        (name = "Accounts", description = "Registration, sessions and profiles"),
        (name = "Blogs", description = "Publishing, favorites and ratings"),
        (name = "Authors", description = "Public author pages")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add session cookie security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::new(
                            crate::auth::SESSION_COOKIE,
                        ),
                    ),
                ),
            );
        }
    }
}
