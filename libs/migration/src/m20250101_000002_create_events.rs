use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_auto(Events::Id))
                    .col(integer(Events::AuthorId))
                    .col(string(Events::Title))
                    .col(text_null(Events::Content))
                    .col(timestamp_with_time_zone(Events::StartAt))
                    .col(timestamp_with_time_zone(Events::EndAt))
                    .col(boolean(Events::IsPublic))
                    .col(boolean(Events::IsPublished).default(false))
                    .col(
                        timestamp_with_time_zone(Events::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_author_id")
                            .from(Events::Table, Events::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Public listing filters on is_published and orders by start_at
        manager
            .create_index(
                Index::create()
                    .name("idx_events_published_start_at")
                    .table(Events::Table)
                    .col(Events::IsPublished)
                    .col(Events::StartAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_author_id")
                    .table(Events::Table)
                    .col(Events::AuthorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    AuthorId,
    Title,
    Content,
    StartAt,
    EndAt,
    IsPublic,
    IsPublished,
    CreatedAt,
}
