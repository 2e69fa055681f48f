use crate::{
    config::Config,
    services::{
        AiService, AssessmentService, CreditsService, InsightService, JwtService, LetterService,
        ResumeService, StorageService,
    },
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: Arc<redis::Client>,
    pub jwt_service: Arc<JwtService>,
    pub credits_service: Arc<CreditsService>,
    pub ai_service: Arc<AiService>,
    pub resume_service: Arc<ResumeService>,
    pub letter_service: Arc<LetterService>,
    pub insight_service: Arc<InsightService>,
    pub assessment_service: Arc<AssessmentService>,
    pub storage_service: Arc<StorageService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
        // Connect to database
        let db = sea_orm::Database::connect(&config.database.url).await?;

        // Connect to Redis
        let redis = Arc::new(redis::Client::open(config.redis.url.as_str())?);

        // Initialize services
        let jwt_service = Arc::new(JwtService::new(Arc::new(config.auth.clone())));
        let credits_service = Arc::new(CreditsService::new(db.clone(), &config.credits));
        let ai_service = Arc::new(AiService::new(&config.ai, credits_service.clone()));
        let resume_service = Arc::new(ResumeService::new(db.clone()));
        let letter_service = Arc::new(LetterService::new(db.clone(), ai_service.clone()));
        let insight_service = Arc::new(InsightService::new(db.clone(), ai_service.clone()));
        let assessment_service = Arc::new(AssessmentService::new(db.clone(), ai_service.clone()));
        let storage_service = Arc::new(StorageService::new(&config.storage).await?);

        Ok(Self {
            db,
            redis,
            jwt_service,
            credits_service,
            ai_service,
            resume_service,
            letter_service,
            insight_service,
            assessment_service,
            storage_service,
            config: Arc::new(config),
        })
    }
}
