//! Hard deletes cascade through foreign keys.

use foodblog_lib::entity::{favorite, profile, rating};
use foodblog_lib::error::AppError;
use foodblog_lib::models::Category;
use sea_orm::{EntityTrait, PaginatorTrait};

use super::test_helpers::*;

async fn row_counts(pool: &foodblog_lib::db::DbPool) -> (u64, u64, u64) {
    let profiles = profile::Entity::find().count(pool.connection()).await.unwrap();
    let favorites = favorite::Entity::find().count(pool.connection()).await.unwrap();
    let ratings = rating::Entity::find().count(pool.connection()).await.unwrap();
    (profiles, favorites, ratings)
}

#[actix_rt::test]
async fn test_deleting_user_removes_everything_they_own() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let author = register_user(&app, "departing", true).await;
    let reader = register_user(&app, "staying", false).await;

    let own = seed_blog(&pool, author, "Mine", Category::Desi, "x", noon(2024, 1, 1)).await;
    let other = {
        let writer = register_user(&app, "other.author", true).await;
        seed_blog(&pool, writer, "Theirs", Category::Greek, "y", noon(2024, 1, 2)).await
    };

    // The departing user interacts with someone else's blog, the reader with theirs.
    pool.add_favorite(author, other.id).await.unwrap();
    pool.rate(author, other.id, 4).await.unwrap();
    pool.add_favorite(reader, own.id).await.unwrap();
    pool.rate(reader, own.id, 2).await.unwrap();
    assert_eq!(row_counts(&pool).await, (3, 2, 2));

    pool.delete_user(author).await.unwrap();

    assert!(pool.find_user_by_id(author).await.unwrap().is_none());
    assert!(pool.find_profile_by_user(author).await.unwrap().is_none());
    assert!(pool.get_blog_by_id(own.id).await.unwrap().is_none());
    assert!(pool.get_blog_by_id(other.id).await.unwrap().is_some());
    // Remaining: reader and other.author profiles; no favorites or ratings left.
    assert_eq!(row_counts(&pool).await, (2, 0, 0));
}

#[actix_rt::test]
async fn test_deleting_blog_removes_its_favorites_and_ratings() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let author = register_user(&app, "pruner", true).await;
    let reader = register_user(&app, "watcher", false).await;

    let doomed = seed_blog(&pool, author, "Doomed", Category::American, "a", noon(2024, 1, 1)).await;
    let kept = seed_blog(&pool, author, "Kept", Category::American, "b", noon(2024, 1, 2)).await;
    pool.add_favorite(reader, doomed.id).await.unwrap();
    pool.rate(reader, doomed.id, 6).await.unwrap();
    pool.add_favorite(reader, kept.id).await.unwrap();

    pool.delete_blog(doomed.id).await.unwrap();

    assert_eq!(pool.count_favorites(reader, doomed.id).await.unwrap(), 0);
    assert_eq!(pool.count_ratings(reader, doomed.id).await.unwrap(), 0);
    assert_eq!(pool.count_favorites(reader, kept.id).await.unwrap(), 1);
    assert!(pool.find_user_by_id(author).await.unwrap().is_some());
}

#[actix_rt::test]
async fn test_deleting_missing_rows_is_not_found() {
    let pool = create_test_pool().await;

    assert!(matches!(pool.delete_user(404).await, Err(AppError::NotFound(_))));
    assert!(matches!(pool.delete_blog(404).await, Err(AppError::NotFound(_))));
}
