//! Registration, login, logout and the caller's own profile.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use tracing::info;
use validator::Validate;

use crate::auth::{CurrentUser, session};
use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    LoginRequest, ProfileResponse, RegisterRequest, SessionResponse, UpdateProfileRequest,
};
use crate::services::accounts;

/// Create an account and its profile. Does not log in.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 422, description = "Field validation failed or username taken", body = crate::error::ErrorResponse),
    )
)]
pub async fn register(
    pool: web::Data<DbPool>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let (user, profile) = accounts::register(&pool, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(SessionResponse {
        user_id: user.id,
        username: user.username,
        is_author: profile.is_author,
    }))
}

/// Check credentials and start a session.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = SessionResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
    )
)]
pub async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let user = accounts::authenticate(&pool, body.into_inner())
        .await?
        .ok_or(AppError::AuthenticationFailed)?;

    let is_author = pool
        .find_profile_by_user(user.id)
        .await?
        .map(|p| p.is_author)
        .unwrap_or(false);

    let token = session::create_session_token(
        user.id,
        &user.username,
        &config.session.secret,
        config.session.ttl_secs,
    )?;
    let cookie = session::session_cookie(
        token,
        &config.session,
        config.environment.is_production(),
    );

    info!(user_id = user.id, "User logged in");

    Ok(HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        user_id: user.id,
        username: user.username,
        is_author,
    }))
}

/// End the session and go home.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Accounts",
    responses(
        (status = 302, description = "Session cleared, redirect to /"),
    )
)]
pub async fn logout(config: web::Data<Config>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(session::clear_session_cookie(
            config.environment.is_production(),
        ))
        .finish()
}

/// The caller's own profile.
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Accounts",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 302, description = "Not logged in, redirect to /login"),
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn get_profile(user: CurrentUser, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let profile = load_own_profile(&pool, &user).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Update bio, picture reference and social link. Empty strings clear a field.
#[utoipa::path(
    post,
    path = "/profile",
    tag = "Accounts",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 302, description = "Not logged in, redirect to /login"),
        (status = 422, description = "Field validation failed", body = crate::error::ErrorResponse),
    ),
    security(
        ("session_cookie" = [])
    )
)]
pub async fn update_profile(
    user: CurrentUser,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner().normalized();
    request.validate()?;

    pool.update_profile(user.user_id, request).await?;

    let profile = load_own_profile(&pool, &user).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn load_own_profile(pool: &DbPool, user: &CurrentUser) -> AppResult<ProfileResponse> {
    let account = pool
        .find_user_by_id(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", user.user_id)))?;

    let profile = pool
        .find_profile_by_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {}", user.user_id)))?;

    Ok(ProfileResponse::private(profile, &account))
}

/// Configure account routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/logout").route(web::get().to(logout)))
        .service(
            web::resource("/profile")
                .route(web::get().to(get_profile))
                .route(web::post().to(update_profile)),
        );
}
