//! Migration: Create the notes table.
//!
//! `title_norm` holds the case-folded title and carries the unique index
//! that enforces title uniqueness under the folded comparison mode.
//! `owner` is intentionally not a foreign key: an orphaned reference is a
//! listing-time failure, not a write-time one.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Notes::Owner).uuid().not_null())
                    .col(ColumnDef::new(Notes::Title).string().not_null())
                    .col(
                        ColumnDef::new(Notes::TitleNorm)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Notes::Text).text().not_null())
                    .col(
                        ColumnDef::new(Notes::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for the referential-integrity check on user deletion
        manager
            .create_index(
                Index::create()
                    .name("idx_notes_owner")
                    .table(Notes::Table)
                    .col(Notes::Owner)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_notes_owner").table(Notes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Notes {
    Table,
    Id,
    Owner,
    Title,
    TitleNorm,
    Text,
    Completed,
    CreatedAt,
    UpdatedAt,
}
