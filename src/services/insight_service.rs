use crate::{
    error::{ApiError, Result},
    models::insights::InsightPayload,
    prompt::PromptSections,
    services::AiService,
    utils::parse_ai_json,
};
use sea_orm::{entity::*, query::*, sea_query::OnConflict, DatabaseConnection};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Industry insight artifact: a structured market snapshot generated in
/// JSON mode and upserted per (user, industry).
pub struct InsightService {
    db: DatabaseConnection,
    ai: Arc<AiService>,
}

impl InsightService {
    pub fn new(db: DatabaseConnection, ai: Arc<AiService>) -> Self {
        Self { db, ai }
    }

    /// Generate a fresh snapshot for the industry and store it. A repeat
    /// request for the same industry overwrites the previous snapshot
    /// rather than creating a second row.
    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        user_id: Uuid,
        industry: &str,
    ) -> Result<entity::industry_insights::Model> {
        let instruction = Self::build_prompt(industry);
        let text = self.ai.generate(user_id, &instruction, true).await?;
        let payload: InsightPayload = parse_ai_json(&text)?;

        self.upsert(user_id, industry, &payload).await
    }

    #[instrument(skip(self))]
    pub async fn get(
        &self,
        user_id: Uuid,
        industry: &str,
    ) -> Result<entity::industry_insights::Model> {
        entity::industry_insights::Entity::find()
            .filter(entity::industry_insights::Column::UserId.eq(user_id))
            .filter(entity::industry_insights::Column::Industry.eq(industry))
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::NotFound("No insight for this industry".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<entity::industry_insights::Model>> {
        let insights = entity::industry_insights::Entity::find()
            .filter(entity::industry_insights::Column::UserId.eq(user_id))
            .order_by_desc(entity::industry_insights::Column::UpdatedAt)
            .all(&self.db)
            .await?;

        Ok(insights)
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        industry: &str,
        payload: &InsightPayload,
    ) -> Result<entity::industry_insights::Model> {
        let now = time::OffsetDateTime::now_utc();
        let insight = entity::industry_insights::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            industry: Set(industry.to_string()),
            growth_rate: Set(payload.growth_rate),
            demand_level: Set(payload.demand_level.clone()),
            market_outlook: Set(payload.market_outlook.clone()),
            top_skills: Set(serde_json::to_value(&payload.top_skills)?),
            key_trends: Set(serde_json::to_value(&payload.key_trends)?),
            salary_ranges: Set(serde_json::to_value(&payload.salary_ranges)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        entity::industry_insights::Entity::insert(insight)
            .on_conflict(
                OnConflict::columns([
                    entity::industry_insights::Column::UserId,
                    entity::industry_insights::Column::Industry,
                ])
                .update_columns([
                    entity::industry_insights::Column::GrowthRate,
                    entity::industry_insights::Column::DemandLevel,
                    entity::industry_insights::Column::MarketOutlook,
                    entity::industry_insights::Column::TopSkills,
                    entity::industry_insights::Column::KeyTrends,
                    entity::industry_insights::Column::SalaryRanges,
                    entity::industry_insights::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await?;

        info!("Stored insight for user {} industry {}", user_id, industry);

        self.get(user_id, industry).await
    }

    fn build_prompt(industry: &str) -> String {
        let sections = PromptSections {
            context: None,
            role: Some("You are a labor market analyst.".to_string()),
            instruction: Some(format!(
                "Produce a current market snapshot for the {} industry.",
                industry
            )),
            specification: Some(
                "Return a JSON object with keys growthRate (number, percent), demandLevel \
                 (\"Low\" | \"Medium\" | \"High\"), marketOutlook (\"Negative\" | \"Neutral\" | \
                 \"Positive\"), topSkills (array of strings), keyTrends (array of strings), and \
                 salaryRanges (array of objects with role, min, max, median as yearly USD). \
                 Return only the JSON object, no prose."
                    .to_string(),
            ),
            performance: Some("Use realistic, current figures; at least five top skills.".to_string()),
            example: None,
        };

        sections.assemble()
    }
}
