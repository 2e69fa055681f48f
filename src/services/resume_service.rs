use crate::{
    error::{ApiError, Result},
    models::resume::{
        EducationPayload, ExperiencePayload, PersonalInfoPayload, ProjectPayload, ResumeAggregate,
        ResumeCreateRequest, ResumeUpdateRequest,
    },
};
use sea_orm::{
    entity::*, query::*, sea_query::OnConflict, DatabaseConnection, DatabaseTransaction,
    TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

/// Writer for the resume aggregate: the root row plus its owned child
/// collections, always mutated inside one transaction.
///
/// Updates use full-collection replace for the list children, so child row
/// ids are not stable across updates. Only the personal-info child keeps
/// its identity (upserted by resume id).
pub struct ResumeService {
    db: DatabaseConnection,
}

impl ResumeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the aggregate atomically and return only the new identity.
    /// Each child list is inserted independently; a missing list does not
    /// block the others, and any insert failure rolls the whole aggregate
    /// back.
    #[instrument(skip(self, payload))]
    pub async fn create(&self, owner_id: Uuid, payload: ResumeCreateRequest) -> Result<Uuid> {
        let txn = self.db.begin().await?;
        let now = time::OffsetDateTime::now_utc();
        let resume_id = Uuid::new_v4();

        let resume = entity::resumes::ActiveModel {
            id: Set(resume_id),
            user_id: Set(owner_id),
            title: Set(payload.title),
            content: Set(payload.content),
            json: Set(None),
            ats_score: Set(None),
            template: Set(payload.template.unwrap_or_else(|| "classic".to_string())),
            accent_color: Set(payload
                .accent_color
                .unwrap_or_else(|| "#1f6feb".to_string())),
            is_public: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        entity::resumes::Entity::insert(resume).exec(&txn).await?;

        if let Some(info) = payload.personal_info {
            Self::upsert_personal_info(resume_id, info, &txn).await?;
        }
        if let Some(experiences) = payload.experiences {
            Self::insert_experiences(resume_id, experiences, &txn).await?;
        }
        if let Some(educations) = payload.educations {
            Self::insert_educations(resume_id, educations, &txn).await?;
        }
        if let Some(projects) = payload.projects {
            Self::insert_projects(resume_id, projects, &txn).await?;
        }

        txn.commit().await?;

        info!("Created resume {} for user {}", resume_id, owner_id);

        Ok(resume_id)
    }

    /// Apply a partial update atomically.
    ///
    /// Scalars update in place; personal info is upserted; each child
    /// collection present in the payload is replaced wholesale (delete all
    /// rows, insert the provided set). A present-but-empty list clears the
    /// collection. Omitted collections are untouched.
    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        resume_id: Uuid,
        owner_id: Uuid,
        payload: ResumeUpdateRequest,
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        let resume = Self::find_owned(resume_id, owner_id, &txn).await?;

        let mut resume_active: entity::resumes::ActiveModel = resume.into();
        if let Some(title) = payload.title {
            resume_active.title = Set(title);
        }
        if let Some(content) = payload.content {
            resume_active.content = Set(Some(content));
        }
        if let Some(ats_score) = payload.ats_score {
            resume_active.ats_score = Set(Some(ats_score));
        }
        if let Some(template) = payload.template {
            resume_active.template = Set(template);
        }
        if let Some(accent_color) = payload.accent_color {
            resume_active.accent_color = Set(accent_color);
        }
        resume_active.updated_at = Set(time::OffsetDateTime::now_utc());
        resume_active.update(&txn).await?;

        if let Some(info) = payload.personal_info {
            Self::upsert_personal_info(resume_id, info, &txn).await?;
        }

        if let Some(experiences) = payload.experiences {
            entity::experiences::Entity::delete_many()
                .filter(entity::experiences::Column::ResumeId.eq(resume_id))
                .exec(&txn)
                .await?;
            Self::insert_experiences(resume_id, experiences, &txn).await?;
        }
        if let Some(educations) = payload.educations {
            entity::educations::Entity::delete_many()
                .filter(entity::educations::Column::ResumeId.eq(resume_id))
                .exec(&txn)
                .await?;
            Self::insert_educations(resume_id, educations, &txn).await?;
        }
        if let Some(projects) = payload.projects {
            entity::projects::Entity::delete_many()
                .filter(entity::projects::Column::ResumeId.eq(resume_id))
                .exec(&txn)
                .await?;
            Self::insert_projects(resume_id, projects, &txn).await?;
        }

        txn.commit().await?;

        info!("Updated resume {} for user {}", resume_id, owner_id);

        Ok(())
    }

    /// Delete the aggregate when owned by `owner_id`; children cascade.
    /// Returns false when the resume does not exist or belongs to someone
    /// else (the row is left untouched either way).
    #[instrument(skip(self))]
    pub async fn delete(&self, resume_id: Uuid, owner_id: Uuid) -> Result<bool> {
        let result = entity::resumes::Entity::delete_many()
            .filter(entity::resumes::Column::Id.eq(resume_id))
            .filter(entity::resumes::Column::UserId.eq(owner_id))
            .exec(&self.db)
            .await?;

        let deleted = result.rows_affected == 1;
        if deleted {
            info!("Deleted resume {} for user {}", resume_id, owner_id);
        }

        Ok(deleted)
    }

    /// Full aggregate readout for the editor.
    #[instrument(skip(self))]
    pub async fn get(&self, resume_id: Uuid, owner_id: Uuid) -> Result<ResumeAggregate> {
        let resume = entity::resumes::Entity::find()
            .filter(entity::resumes::Column::Id.eq(resume_id))
            .filter(entity::resumes::Column::UserId.eq(owner_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::NotFound("Resume not found".to_string()))?;

        let personal_info = entity::personal_infos::Entity::find()
            .filter(entity::personal_infos::Column::ResumeId.eq(resume_id))
            .one(&self.db)
            .await?;

        let experiences = entity::experiences::Entity::find()
            .filter(entity::experiences::Column::ResumeId.eq(resume_id))
            .order_by_asc(entity::experiences::Column::SortOrder)
            .all(&self.db)
            .await?;

        let educations = entity::educations::Entity::find()
            .filter(entity::educations::Column::ResumeId.eq(resume_id))
            .order_by_asc(entity::educations::Column::SortOrder)
            .all(&self.db)
            .await?;

        let projects = entity::projects::Entity::find()
            .filter(entity::projects::Column::ResumeId.eq(resume_id))
            .order_by_asc(entity::projects::Column::SortOrder)
            .all(&self.db)
            .await?;

        Ok(ResumeAggregate {
            resume,
            personal_info,
            experiences,
            educations,
            projects,
        })
    }

    /// Root rows only, newest first, for the dashboard list.
    #[instrument(skip(self))]
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<entity::resumes::Model>> {
        let resumes = entity::resumes::Entity::find()
            .filter(entity::resumes::Column::UserId.eq(owner_id))
            .order_by_desc(entity::resumes::Column::UpdatedAt)
            .all(&self.db)
            .await?;

        Ok(resumes)
    }

    /// Toggle the public/private flag, free in both directions.
    #[instrument(skip(self))]
    pub async fn set_visibility(
        &self,
        resume_id: Uuid,
        owner_id: Uuid,
        is_public: bool,
    ) -> Result<()> {
        let txn = self.db.begin().await?;
        let resume = Self::find_owned(resume_id, owner_id, &txn).await?;

        let mut resume_active: entity::resumes::ActiveModel = resume.into();
        resume_active.is_public = Set(is_public);
        resume_active.updated_at = Set(time::OffsetDateTime::now_utc());
        resume_active.update(&txn).await?;
        txn.commit().await?;

        Ok(())
    }

    /// Cache the uploaded thumbnail URL inside the root's json blob. The URL
    /// is treated as an opaque string. Returns the previously cached URL, if
    /// any, so the caller can delete the replaced object from storage.
    #[instrument(skip(self, url))]
    pub async fn set_thumbnail(
        &self,
        resume_id: Uuid,
        owner_id: Uuid,
        url: &str,
    ) -> Result<Option<String>> {
        let txn = self.db.begin().await?;
        let resume = Self::find_owned(resume_id, owner_id, &txn).await?;

        let previous = resume
            .json
            .as_ref()
            .and_then(|blob| blob.get("thumbnailUrl"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let mut blob = resume
            .json
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));
        if let Some(map) = blob.as_object_mut() {
            map.insert(
                "thumbnailUrl".to_string(),
                serde_json::Value::String(url.to_string()),
            );
        }

        let mut resume_active: entity::resumes::ActiveModel = resume.into();
        resume_active.json = Set(Some(blob));
        resume_active.updated_at = Set(time::OffsetDateTime::now_utc());
        resume_active.update(&txn).await?;
        txn.commit().await?;

        Ok(previous)
    }

    async fn find_owned(
        resume_id: Uuid,
        owner_id: Uuid,
        txn: &DatabaseTransaction,
    ) -> Result<entity::resumes::Model> {
        entity::resumes::Entity::find()
            .filter(entity::resumes::Column::Id.eq(resume_id))
            .filter(entity::resumes::Column::UserId.eq(owner_id))
            .one(txn)
            .await?
            .ok_or_else(|| ApiError::NotFound("Resume not found".to_string()))
    }

    async fn upsert_personal_info(
        resume_id: Uuid,
        info: PersonalInfoPayload,
        txn: &DatabaseTransaction,
    ) -> Result<()> {
        let model = entity::personal_infos::ActiveModel {
            id: Set(Uuid::new_v4()),
            resume_id: Set(resume_id),
            full_name: Set(info.full_name),
            headline: Set(info.headline),
            email: Set(info.email),
            phone: Set(info.phone),
            location: Set(info.location),
            website: Set(info.website),
            summary: Set(info.summary),
        };

        entity::personal_infos::Entity::insert(model)
            .on_conflict(
                OnConflict::column(entity::personal_infos::Column::ResumeId)
                    .update_columns([
                        entity::personal_infos::Column::FullName,
                        entity::personal_infos::Column::Headline,
                        entity::personal_infos::Column::Email,
                        entity::personal_infos::Column::Phone,
                        entity::personal_infos::Column::Location,
                        entity::personal_infos::Column::Website,
                        entity::personal_infos::Column::Summary,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;

        Ok(())
    }

    async fn insert_experiences(
        resume_id: Uuid,
        items: Vec<ExperiencePayload>,
        txn: &DatabaseTransaction,
    ) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let models = items.into_iter().enumerate().map(|(idx, item)| {
            entity::experiences::ActiveModel {
                id: Set(Uuid::new_v4()),
                resume_id: Set(resume_id),
                title: Set(item.title),
                company: Set(item.company),
                location: Set(item.location),
                start_date: Set(item.start_date),
                end_date: Set(item.end_date),
                description: Set(item.description),
                sort_order: Set(idx as i32),
            }
        });

        entity::experiences::Entity::insert_many(models)
            .exec(txn)
            .await?;

        Ok(())
    }

    async fn insert_educations(
        resume_id: Uuid,
        items: Vec<EducationPayload>,
        txn: &DatabaseTransaction,
    ) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let models = items.into_iter().enumerate().map(|(idx, item)| {
            entity::educations::ActiveModel {
                id: Set(Uuid::new_v4()),
                resume_id: Set(resume_id),
                school: Set(item.school),
                degree: Set(item.degree),
                field_of_study: Set(item.field_of_study),
                start_date: Set(item.start_date),
                end_date: Set(item.end_date),
                description: Set(item.description),
                sort_order: Set(idx as i32),
            }
        });

        entity::educations::Entity::insert_many(models)
            .exec(txn)
            .await?;

        Ok(())
    }

    async fn insert_projects(
        resume_id: Uuid,
        items: Vec<ProjectPayload>,
        txn: &DatabaseTransaction,
    ) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let models = items.into_iter().enumerate().map(|(idx, item)| {
            entity::projects::ActiveModel {
                id: Set(Uuid::new_v4()),
                resume_id: Set(resume_id),
                name: Set(item.name),
                description: Set(item.description),
                url: Set(item.url),
                sort_order: Set(idx as i32),
            }
        });

        entity::projects::Entity::insert_many(models)
            .exec(txn)
            .await?;

        Ok(())
    }
}
