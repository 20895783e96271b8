//! Registration, login, logout and profile editing.

use actix_web::http::header;
use actix_web::test;
use foodblog_lib::auth::SESSION_COOKIE;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_register_creates_user_and_profile() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let user_id = register_user(&app, "new.cook", false).await;

    let user = pool.find_user_by_id(user_id).await.unwrap().unwrap();
    assert_eq!(user.username, "new.cook");
    assert_ne!(user.password_hash, TEST_PASSWORD);

    let profile = pool.find_profile_by_user(user_id).await.unwrap().unwrap();
    assert!(!profile.is_author);
    assert_eq!(profile.bio, None);
}

#[actix_rt::test]
async fn test_register_rejects_taken_username() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    register_user(&app, "taken", false).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(serde_json::json!({
            "username": "taken",
            "email": "other@example.com",
            "password1": TEST_PASSWORD,
            "password2": TEST_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["fields"]["username"][0],
        "A user with that username already exists."
    );
}

#[actix_rt::test]
async fn test_register_reports_field_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(serde_json::json!({
            "username": "has spaces",
            "email": "nope",
            "password1": "longenough1",
            "password2": "longenough2",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let fields = body["fields"].as_object().unwrap();
    assert!(fields.contains_key("username"));
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("password2"));
    assert!(pool.find_user_by_username("has spaces").await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_login_sets_http_only_session_cookie() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let user_id = register_user(&app, "writer", true).await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(serde_json::json!({ "username": "writer", "password": TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .unwrap();
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["is_author"], true);
}

#[actix_rt::test]
async fn test_login_failures_share_one_message() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    register_user(&app, "real.user", false).await;

    for (username, password) in [("real.user", "wrong-password"), ("ghost", TEST_PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "username": username, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
        assert!(resp.response().cookies().all(|c| c.name() != SESSION_COOKIE));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_rt::test]
async fn test_logout_clears_session_and_redirects_home() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (_, cookie) = signup(&app, "leaving", false).await;

    let req = test::TestRequest::get()
        .uri("/logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap();
    assert_eq!(cleared.value(), "");
}

#[actix_rt::test]
async fn test_profile_view_and_update() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (user_id, cookie) = signup(&app, "profiled", false).await;

    let (status, body) = get_json(&app, "/profile", Some(&cookie)).await;
    assert_eq!(status, 200);
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["email"], "profiled@example.com");

    let (status, body) = post_json(
        &app,
        "/profile",
        &cookie,
        serde_json::json!({
            "bio": "Home cook from Lahore",
            "profile_pic": "profile_pics/profiled.jpg",
            "social_link": "https://example.com/profiled",
        }),
    )
    .await;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["bio"], "Home cook from Lahore");
    assert_eq!(body["social_link"], "https://example.com/profiled");

    // Empty strings clear fields
    let (status, body) = post_json(
        &app,
        "/profile",
        &cookie,
        serde_json::json!({ "bio": "", "profile_pic": "", "social_link": "" }),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body["bio"].is_null());
    assert!(body["social_link"].is_null());

    let stored = pool.find_profile_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(stored.bio, None);
    assert_eq!(stored.profile_pic, None);
}

#[actix_rt::test]
async fn test_profile_rejects_invalid_link() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (user_id, cookie) = signup(&app, "linky", false).await;

    let (status, body) = post_json(
        &app,
        "/profile",
        &cookie,
        serde_json::json!({ "bio": "kept out", "social_link": "not a url" }),
    )
    .await;

    assert_eq!(status, 422);
    assert!(body["fields"]["social_link"].is_array());
    let stored = pool.find_profile_by_user(user_id).await.unwrap().unwrap();
    assert_eq!(stored.bio, None);
}
