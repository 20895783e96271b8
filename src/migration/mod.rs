//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261018_000001_create_users;
mod m20261018_000002_create_profiles;
mod m20261018_000003_create_blogs;
mod m20261018_000004_create_favorites;
mod m20261018_000005_create_ratings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_users::Migration),
            Box::new(m20261018_000002_create_profiles::Migration),
            Box::new(m20261018_000003_create_blogs::Migration),
            Box::new(m20261018_000004_create_favorites::Migration),
            Box::new(m20261018_000005_create_ratings::Migration),
        ]
    }
}
