use crate::{
    error::{ApiError, Result},
    models::letters::LetterGenerateRequest,
    prompt::PromptSections,
    services::AiService,
    utils::strip_code_fences,
};
use sea_orm::{entity::*, query::*, DatabaseConnection};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_COMPLETED: &str = "completed";

/// Cover letter artifact: generated through the credit-gated gateway,
/// persisted per user with a forward-only draft -> completed status.
pub struct LetterService {
    db: DatabaseConnection,
    ai: Arc<AiService>,
}

impl LetterService {
    pub fn new(db: DatabaseConnection, ai: Arc<AiService>) -> Self {
        Self { db, ai }
    }

    /// Generate and persist a draft cover letter. The gateway settles the
    /// credit; persistence happens only after a successful generation.
    #[instrument(skip(self, request))]
    pub async fn generate(
        &self,
        user_id: Uuid,
        request: LetterGenerateRequest,
    ) -> Result<entity::cover_letters::Model> {
        let instruction = Self::build_prompt(&request);
        let text = self.ai.generate(user_id, &instruction, false).await?;
        let content = strip_code_fences(&text).to_string();

        self.insert_letter(
            user_id,
            &request.company_name,
            &request.job_title,
            request.job_description.as_deref(),
            content,
        )
        .await
    }

    /// Persist a letter body directly (also the seam integration tests use
    /// to exercise the status machine without a provider call).
    #[instrument(skip(self, content))]
    pub async fn insert_letter(
        &self,
        user_id: Uuid,
        company_name: &str,
        job_title: &str,
        job_description: Option<&str>,
        content: String,
    ) -> Result<entity::cover_letters::Model> {
        let now = time::OffsetDateTime::now_utc();
        let letter = entity::cover_letters::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            title: Set(format!("{} at {}", job_title, company_name)),
            company_name: Set(company_name.to_string()),
            job_title: Set(job_title.to_string()),
            job_description: Set(job_description.map(|s| s.to_string())),
            content: Set(content),
            status: Set(STATUS_DRAFT.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = letter.insert(&self.db).await?;

        info!("Created cover letter {} for user {}", model.id, user_id);

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<entity::cover_letters::Model>> {
        let letters = entity::cover_letters::Entity::find()
            .filter(entity::cover_letters::Column::UserId.eq(user_id))
            .order_by_desc(entity::cover_letters::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(letters)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, letter_id: Uuid, user_id: Uuid) -> Result<entity::cover_letters::Model> {
        self.find_owned(letter_id, user_id).await
    }

    /// Move the letter to `completed`. Forward only: a completed letter
    /// stays completed; no operation reverts to draft.
    #[instrument(skip(self))]
    pub async fn mark_completed(
        &self,
        letter_id: Uuid,
        user_id: Uuid,
    ) -> Result<entity::cover_letters::Model> {
        let letter = self.find_owned(letter_id, user_id).await?;

        if letter.status == STATUS_COMPLETED {
            return Ok(letter);
        }

        let mut letter_active: entity::cover_letters::ActiveModel = letter.into();
        letter_active.status = Set(STATUS_COMPLETED.to_string());
        letter_active.updated_at = Set(time::OffsetDateTime::now_utc());
        let updated = letter_active.update(&self.db).await?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, letter_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = entity::cover_letters::Entity::delete_many()
            .filter(entity::cover_letters::Column::Id.eq(letter_id))
            .filter(entity::cover_letters::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    fn build_prompt(request: &LetterGenerateRequest) -> String {
        let mut context = String::new();
        if let Some(background) = &request.user_background {
            context.push_str("Candidate background:\n");
            context.push_str(background);
            context.push('\n');
        }
        if let Some(jd) = &request.job_description {
            context.push_str("Job description:\n");
            context.push_str(jd);
            context.push('\n');
        }

        let sections = PromptSections {
            context: (!context.is_empty()).then_some(context),
            role: Some(
                "You are an expert career coach writing on behalf of the candidate.".to_string(),
            ),
            instruction: Some(format!(
                "Write a cover letter for the {} position at {}.",
                request.job_title, request.company_name
            )),
            specification: Some(
                "At most 350 words, three paragraphs, no placeholders or bracketed blanks. \
                 Return only the letter body."
                    .to_string(),
            ),
            performance: Some(
                request
                    .tone
                    .clone()
                    .unwrap_or_else(|| "Confident and professional, never obsequious.".to_string()),
            ),
            example: None,
        };

        sections.assemble()
    }

    async fn find_owned(
        &self,
        letter_id: Uuid,
        user_id: Uuid,
    ) -> Result<entity::cover_letters::Model> {
        entity::cover_letters::Entity::find()
            .filter(entity::cover_letters::Column::Id.eq(letter_id))
            .filter(entity::cover_letters::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::NotFound("Cover letter not found".to_string()))
    }
}
