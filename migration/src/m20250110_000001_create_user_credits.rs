use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Credit ledger: one row per user, admission gate for AI operations
        manager
            .create_table(
                Table::create()
                    .table(UserCredits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCredits::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserCredits::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(UserCredits::Balance)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(
                        ColumnDef::new(UserCredits::IsPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(UserCredits::Metadata).json_binary().null())
                    .col(
                        ColumnDef::new(UserCredits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCredits::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The unique index makes the per-user row a hard invariant and lets
        // provisioning use ON CONFLICT DO NOTHING.
        manager
            .create_index(
                Index::create()
                    .name("idx_user_credits_user_id")
                    .table(UserCredits::Table)
                    .col(UserCredits::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserCredits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserCredits {
    Table,
    Id,
    UserId,
    Balance,
    IsPaid,
    Metadata,
    CreatedAt,
    UpdatedAt,
}
