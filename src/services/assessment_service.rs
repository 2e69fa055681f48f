use crate::{
    error::Result,
    models::assessments::{AssessmentResultRequest, QuizGenerateRequest, QuizPayload},
    prompt::PromptSections,
    services::AiService,
    utils::parse_ai_json,
};
use sea_orm::{entity::*, query::*, DatabaseConnection};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

const DEFAULT_QUESTION_COUNT: u8 = 10;

/// Skill assessments: quiz/mock-interview question sets generated in JSON
/// mode, plus persisted results with scores and improvement tips.
pub struct AssessmentService {
    db: DatabaseConnection,
    ai: Arc<AiService>,
}

impl AssessmentService {
    pub fn new(db: DatabaseConnection, ai: Arc<AiService>) -> Self {
        Self { db, ai }
    }

    /// Generate a question set. Nothing is persisted here; the client
    /// submits the answered quiz through `save_result`.
    #[instrument(skip(self, request))]
    pub async fn generate_quiz(
        &self,
        user_id: Uuid,
        request: QuizGenerateRequest,
    ) -> Result<QuizPayload> {
        let instruction = Self::build_prompt(&request);
        let text = self.ai.generate(user_id, &instruction, true).await?;
        let payload: QuizPayload = parse_ai_json(&text)?;

        Ok(payload)
    }

    #[instrument(skip(self, request))]
    pub async fn save_result(
        &self,
        user_id: Uuid,
        request: AssessmentResultRequest,
    ) -> Result<entity::assessments::Model> {
        let now = time::OffsetDateTime::now_utc();
        let assessment = entity::assessments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            category: Set(request.category),
            quiz_score: Set(request.quiz_score),
            questions: Set(request.questions),
            improvement_tip: Set(request.improvement_tip),
            created_at: Set(now),
        };

        let model = assessment.insert(&self.db).await?;

        info!("Saved assessment {} for user {}", model.id, user_id);

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<entity::assessments::Model>> {
        let assessments = entity::assessments::Entity::find()
            .filter(entity::assessments::Column::UserId.eq(user_id))
            .order_by_desc(entity::assessments::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(assessments)
    }

    fn build_prompt(request: &QuizGenerateRequest) -> String {
        let count = request.question_count.unwrap_or(DEFAULT_QUESTION_COUNT);
        let skills = if request.skills.is_empty() {
            String::new()
        } else {
            format!("Focus on these skills: {}.\n", request.skills.join(", "))
        };

        let sections = PromptSections {
            context: (!skills.is_empty()).then_some(skills),
            role: Some("You are a technical interviewer.".to_string()),
            instruction: Some(format!(
                "Write {} multiple-choice interview questions for the {} category.",
                count, request.category
            )),
            specification: Some(
                "Return a JSON object with a single key questions: an array of objects with \
                 question (string), options (array of exactly four strings), correctAnswer \
                 (one of the options, verbatim), and explanation (string). Return only the \
                 JSON object, no prose."
                    .to_string(),
            ),
            performance: Some(
                "Questions must be unambiguous with exactly one correct option.".to_string(),
            ),
            example: None,
        };

        sections.assemble()
    }
}
