use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoverLetters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoverLetters::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CoverLetters::UserId).uuid().not_null())
                    .col(ColumnDef::new(CoverLetters::Title).string().not_null())
                    .col(ColumnDef::new(CoverLetters::CompanyName).string().not_null())
                    .col(ColumnDef::new(CoverLetters::JobTitle).string().not_null())
                    .col(ColumnDef::new(CoverLetters::JobDescription).text().null())
                    .col(ColumnDef::new(CoverLetters::Content).text().not_null())
                    .col(
                        ColumnDef::new(CoverLetters::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(CoverLetters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoverLetters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cover_letters_user_id")
                    .table(CoverLetters::Table)
                    .col(CoverLetters::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::UserId).uuid().not_null())
                    .col(ColumnDef::new(Assessments::Category).string().not_null())
                    .col(
                        ColumnDef::new(Assessments::QuizScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Assessments::Questions)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::ImprovementTip).text().null())
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assessments_user_id")
                    .table(Assessments::Table)
                    .col(Assessments::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IndustryInsights::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IndustryInsights::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IndustryInsights::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(IndustryInsights::Industry)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryInsights::GrowthRate)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(IndustryInsights::DemandLevel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryInsights::MarketOutlook)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryInsights::TopSkills)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryInsights::KeyTrends)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryInsights::SalaryRanges)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryInsights::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IndustryInsights::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Upsert target: one cached insight per (user, industry)
        manager
            .create_index(
                Index::create()
                    .name("idx_industry_insights_user_industry")
                    .table(IndustryInsights::Table)
                    .col(IndustryInsights::UserId)
                    .col(IndustryInsights::Industry)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IndustryInsights::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CoverLetters::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CoverLetters {
    Table,
    Id,
    UserId,
    Title,
    CompanyName,
    JobTitle,
    JobDescription,
    Content,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assessments {
    Table,
    Id,
    UserId,
    Category,
    QuizScore,
    Questions,
    ImprovementTip,
    CreatedAt,
}

#[derive(DeriveIden)]
enum IndustryInsights {
    Table,
    Id,
    UserId,
    Industry,
    GrowthRate,
    DemandLevel,
    MarketOutlook,
    TopSkills,
    KeyTrends,
    SalaryRanges,
    CreatedAt,
    UpdatedAt,
}
