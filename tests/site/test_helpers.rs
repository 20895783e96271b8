//! Shared test helpers for site tests.

use actix_web::cookie::Cookie;
use actix_web::{App, dev::ServiceResponse, test, web};
use chrono::{DateTime, NaiveDate, Utc};
use foodblog_lib::auth::SESSION_COOKIE;
use foodblog_lib::config::{Config, DatabaseSettings, Environment, SessionSettings};
use foodblog_lib::db::DbPool;
use foodblog_lib::entity::blog;
use foodblog_lib::models::{Category, CreateBlogRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use secrecy::SecretString;
use serde_json::Value;

/// Password used for every test account.
pub const TEST_PASSWORD: &str = "saffron-and-cardamom";

/// Session secret used by the test app.
pub const TEST_SESSION_SECRET: &str = "site-test-session-secret";

/// Create a fresh, migrated in-memory database.
///
/// One connection only: every connection to `sqlite::memory:` is a separate database.
pub async fn create_test_pool() -> DbPool {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };

    let pool = DbPool::new(&settings)
        .await
        .expect("Failed to open in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Create a migrated database file served by several connections, so
/// concurrent calls really overlap.
pub async fn create_file_pool(dir: &tempfile::TempDir) -> DbPool {
    let settings = DatabaseSettings {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("site.db").display()),
        max_connections: 4,
        min_connections: 1,
    };

    let pool = DbPool::new(&settings)
        .await
        .expect("Failed to open database file");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Development config pointing at the test database.
pub fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        session: SessionSettings {
            secret: SecretString::from(TEST_SESSION_SECRET.to_string()),
            ttl_secs: 3600,
        },
    }
}

/// Create a test app with every route the server exposes.
pub async fn create_test_app(
    pool: &DbPool,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(test_config()))
            .configure(foodblog_lib::api::configure_app),
    )
    .await
}

/// Register an account through the API. Returns the new user id.
pub async fn register_user<S>(app: &S, username: &str, is_author: bool) -> i32
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password1": TEST_PASSWORD,
            "password2": TEST_PASSWORD,
            "is_author": is_author,
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(status, 201, "Failed to register {}: {}", username, body);

    body["user_id"].as_i64().expect("user_id in register response") as i32
}

/// Log in and return the session cookie.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(serde_json::json!({
            "username": username,
            "password": TEST_PASSWORD,
        }))
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200, "Login failed for {}", username);

    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("session cookie on login response")
}

/// Register and log in. Returns the user id and session cookie.
pub async fn signup<S>(app: &S, username: &str, is_author: bool) -> (i32, Cookie<'static>)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let user_id = register_user(app, username, is_author).await;
    let cookie = login(app, username).await;
    (user_id, cookie)
}

/// POST a JSON body with a session cookie.
pub async fn post_json<S>(
    app: &S,
    uri: &str,
    cookie: &Cookie<'static>,
    body: Value,
) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// GET a JSON page, optionally with a session cookie.
pub async fn get_json<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }

    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// Insert a blog directly, with a fixed creation time.
pub async fn seed_blog(
    pool: &DbPool,
    author_id: i32,
    title: &str,
    category: Category,
    body: &str,
    created_at: DateTime<Utc>,
) -> blog::Model {
    let inserted = pool
        .insert_blog(
            author_id,
            CreateBlogRequest {
                title: title.to_string(),
                category,
                body: body.to_string(),
            },
        )
        .await
        .expect("Failed to insert blog");

    let mut active: blog::ActiveModel = inserted.into();
    active.created_at = Set(created_at);
    active.updated_at = Set(created_at);
    active
        .update(pool.connection())
        .await
        .expect("Failed to backdate blog")
}

/// Midday UTC on the given date.
pub fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date")
        .and_utc()
}

/// Total number of blog rows.
pub async fn blog_count(pool: &DbPool) -> usize {
    blog::Entity::find()
        .all(pool.connection())
        .await
        .expect("Failed to list blogs")
        .len()
}

/// Titles of a feed response, in order.
pub fn titles(body: &Value) -> Vec<String> {
    body["blogs"]
        .as_array()
        .expect("blogs array")
        .iter()
        .map(|b| b["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
