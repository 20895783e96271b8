//! Login gate and author-only publishing.

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::test;
use foodblog_lib::auth::SESSION_COOKIE;
use foodblog_lib::models::Category;
use foodblog_lib::services::flash::FLASH_COOKIE;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_gated_routes_redirect_to_login() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let cases = [
        (test::TestRequest::get().uri("/profile"), "/login?next=%2Fprofile"),
        (test::TestRequest::get().uri("/blog/create"), "/login?next=%2Fblog%2Fcreate"),
        (test::TestRequest::post().uri("/blog/1/favorite"), "/login?next=%2Fblog%2F1%2Ffavorite"),
        (test::TestRequest::post().uri("/blog/1/rate"), "/login?next=%2Fblog%2F1%2Frate"),
    ];

    for (req, expected) in cases {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), 302);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), expected);
    }
}

#[actix_rt::test]
async fn test_forged_session_is_treated_as_logged_out() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get()
        .uri("/profile")
        .cookie(Cookie::new(SESSION_COOKIE, "not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 302);
}

#[actix_rt::test]
async fn test_session_of_deleted_user_is_logged_out() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let author = register_user(&app, "host", true).await;
    let (user_id, cookie) = signup(&app, "gone", false).await;
    let blog = seed_blog(&pool, author, "Kofta", Category::Arabian, "Grilled", noon(2024, 1, 1)).await;

    pool.delete_user(user_id).await.unwrap();

    let favorite_uri = format!("/blog/{}/favorite", blog.id);
    let rate_uri = format!("/blog/{}/rate", blog.id);
    let cases = [
        test::TestRequest::post().uri(&favorite_uri),
        test::TestRequest::post()
            .uri(&rate_uri)
            .set_json(serde_json::json!({ "value": 4 })),
        test::TestRequest::get().uri("/profile"),
    ];

    for req in cases {
        let resp = test::call_service(&app, req.cookie(cookie.clone()).to_request()).await;
        assert_eq!(resp.status(), 302);
        let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
        assert!(location.starts_with("/login?next="), "{}", location);
    }

    assert_eq!(pool.count_favorites(user_id, blog.id).await.unwrap(), 0);
    assert_eq!(pool.count_ratings(user_id, blog.id).await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_reader_is_redirected_before_body_is_read() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (_, cookie) = signup(&app, "hasty.reader", false).await;

    let unknown_category = test::TestRequest::post()
        .uri("/blog/create")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({ "title": "Pad Thai", "category": "Thai", "body": "Noodles" }));
    let malformed = test::TestRequest::post()
        .uri("/blog/create")
        .cookie(cookie)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json");

    for req in [unknown_category, malformed] {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), 303);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
        assert!(resp.response().cookies().any(|c| c.name() == FLASH_COOKIE));
    }

    assert_eq!(blog_count(&pool).await, 0);
}

#[actix_rt::test]
async fn test_reader_cannot_create_blog() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (user_id, cookie) = signup(&app, "reader", false).await;

    let profile = pool.find_profile_by_user(user_id).await.unwrap().unwrap();
    assert!(!foodblog_lib::services::can_create_blog(&profile));

    let req = test::TestRequest::post()
        .uri("/blog/create")
        .cookie(cookie.clone())
        .set_json(serde_json::json!({
            "title": "Sneaky",
            "category": "Desi",
            "body": "Should not be stored",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .map(|c| c.into_owned())
        .unwrap();
    assert_eq!(blog_count(&pool).await, 0);

    // The home page shows the message once, then clears it
    let req = test::TestRequest::get().uri("/").cookie(flash).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(
        resp.response()
            .cookies()
            .any(|c| c.name() == FLASH_COOKIE && c.value().is_empty())
    );
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["messages"],
        serde_json::json!(["Only authors can create blogs"])
    );

    // The form is gated too
    let req = test::TestRequest::get()
        .uri("/blog/create")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 303);
}

#[actix_rt::test]
async fn test_author_creates_blog() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (user_id, cookie) = signup(&app, "publisher", true).await;

    let (status, form) = get_json(&app, "/blog/create", Some(&cookie)).await;
    assert_eq!(status, 200);
    assert_eq!(form["categories"].as_array().unwrap().len(), 5);

    let (status, body) = post_json(
        &app,
        "/blog/create",
        &cookie,
        serde_json::json!({
            "title": "Nihari",
            "category": "Desi",
            "body": "Slow-cooked overnight",
        }),
    )
    .await;

    assert_eq!(status, 201, "{}", body);
    assert_eq!(body["author_id"], user_id);
    assert_eq!(body["author_username"], "publisher");
    assert_eq!(body["category"], "Desi");
    assert_eq!(body["avg_rating"], 0.0);
    assert_eq!(body["created_at"], body["updated_at"]);
    assert_eq!(blog_count(&pool).await, 1);
}

#[actix_rt::test]
async fn test_blog_creation_validates_input() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let (_, cookie) = signup(&app, "careful", true).await;

    let (status, body) = post_json(
        &app,
        "/blog/create",
        &cookie,
        serde_json::json!({ "title": "", "category": "Greek", "body": "" }),
    )
    .await;
    assert_eq!(status, 422);
    assert!(body["fields"]["title"].is_array());
    assert!(body["fields"]["body"].is_array());

    let (status, _) = post_json(
        &app,
        "/blog/create",
        &cookie,
        serde_json::json!({ "title": "Pad Thai", "category": "Thai", "body": "Noodles" }),
    )
    .await;
    assert_eq!(status, 400);

    assert_eq!(blog_count(&pool).await, 0);
}
