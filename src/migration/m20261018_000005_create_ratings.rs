//! Migration: Create ratings table.
//!
//! One rating per (user_id, blog_id); the unique index backs the
//! update-or-create logic under concurrent requests.

use sea_orm_migration::prelude::*;

use super::m20261018_000001_create_users::Users;
use super::m20261018_000003_create_blogs::Blogs;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ratings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ratings::UserId).integer().not_null())
                    .col(ColumnDef::new(Ratings::BlogId).integer().not_null())
                    .col(ColumnDef::new(Ratings::Value).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_user_id")
                            .from(Ratings::Table, Ratings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_blog_id")
                            .from(Ratings::Table, Ratings::BlogId)
                            .to(Blogs::Table, Blogs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_user_blog")
                    .table(Ratings::Table)
                    .col(Ratings::UserId)
                    .col(Ratings::BlogId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Average rating is grouped by blog
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_blog_id")
                    .table(Ratings::Table)
                    .col(Ratings::BlogId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    UserId,
    BlogId,
    Value,
}
