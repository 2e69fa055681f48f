use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resumes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Resumes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Resumes::UserId).uuid().not_null())
                    .col(ColumnDef::new(Resumes::Title).string().not_null())
                    .col(ColumnDef::new(Resumes::Content).text().null())
                    .col(ColumnDef::new(Resumes::Json).json_binary().null())
                    .col(ColumnDef::new(Resumes::AtsScore).integer().null())
                    .col(
                        ColumnDef::new(Resumes::Template)
                            .string()
                            .not_null()
                            .default("classic"),
                    )
                    .col(
                        ColumnDef::new(Resumes::AccentColor)
                            .string()
                            .not_null()
                            .default("#1f6feb"),
                    )
                    .col(
                        ColumnDef::new(Resumes::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Resumes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Resumes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_resumes_user_id")
                    .table(Resumes::Table)
                    .col(Resumes::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PersonalInfos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PersonalInfos::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PersonalInfos::ResumeId).uuid().not_null())
                    .col(ColumnDef::new(PersonalInfos::FullName).string().null())
                    .col(ColumnDef::new(PersonalInfos::Headline).string().null())
                    .col(ColumnDef::new(PersonalInfos::Email).string().null())
                    .col(ColumnDef::new(PersonalInfos::Phone).string().null())
                    .col(ColumnDef::new(PersonalInfos::Location).string().null())
                    .col(ColumnDef::new(PersonalInfos::Website).string().null())
                    .col(ColumnDef::new(PersonalInfos::Summary).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_personal_infos_resume")
                            .from(PersonalInfos::Table, PersonalInfos::ResumeId)
                            .to(Resumes::Table, Resumes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Upsert target for the personal-info child (keyed by resume)
        manager
            .create_index(
                Index::create()
                    .name("idx_personal_infos_resume_id")
                    .table(PersonalInfos::Table)
                    .col(PersonalInfos::ResumeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Experiences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Experiences::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Experiences::ResumeId).uuid().not_null())
                    .col(ColumnDef::new(Experiences::Title).string().not_null())
                    .col(ColumnDef::new(Experiences::Company).string().null())
                    .col(ColumnDef::new(Experiences::Location).string().null())
                    .col(ColumnDef::new(Experiences::StartDate).string().null())
                    .col(ColumnDef::new(Experiences::EndDate).string().null())
                    .col(ColumnDef::new(Experiences::Description).text().null())
                    .col(
                        ColumnDef::new(Experiences::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_experiences_resume")
                            .from(Experiences::Table, Experiences::ResumeId)
                            .to(Resumes::Table, Resumes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_experiences_resume_id")
                    .table(Experiences::Table)
                    .col(Experiences::ResumeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Educations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Educations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Educations::ResumeId).uuid().not_null())
                    .col(ColumnDef::new(Educations::School).string().not_null())
                    .col(ColumnDef::new(Educations::Degree).string().null())
                    .col(ColumnDef::new(Educations::FieldOfStudy).string().null())
                    .col(ColumnDef::new(Educations::StartDate).string().null())
                    .col(ColumnDef::new(Educations::EndDate).string().null())
                    .col(ColumnDef::new(Educations::Description).text().null())
                    .col(
                        ColumnDef::new(Educations::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_educations_resume")
                            .from(Educations::Table, Educations::ResumeId)
                            .to(Resumes::Table, Resumes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_educations_resume_id")
                    .table(Educations::Table)
                    .col(Educations::ResumeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Projects::ResumeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Projects::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Projects::Description).text().null())
                    .col(ColumnDef::new(Projects::Url).string().null())
                    .col(
                        ColumnDef::new(Projects::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_resume")
                            .from(Projects::Table, Projects::ResumeId)
                            .to(Resumes::Table, Resumes::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_resume_id")
                    .table(Projects::Table)
                    .col(Projects::ResumeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Educations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Experiences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PersonalInfos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Resumes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Resumes {
    Table,
    Id,
    UserId,
    Title,
    Content,
    Json,
    AtsScore,
    Template,
    AccentColor,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PersonalInfos {
    Table,
    Id,
    ResumeId,
    FullName,
    Headline,
    Email,
    Phone,
    Location,
    Website,
    Summary,
}

#[derive(DeriveIden)]
enum Experiences {
    Table,
    Id,
    ResumeId,
    Title,
    Company,
    Location,
    StartDate,
    EndDate,
    Description,
    SortOrder,
}

#[derive(DeriveIden)]
enum Educations {
    Table,
    Id,
    ResumeId,
    School,
    Degree,
    FieldOfStudy,
    StartDate,
    EndDate,
    Description,
    SortOrder,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    ResumeId,
    Name,
    Description,
    Url,
    SortOrder,
}
