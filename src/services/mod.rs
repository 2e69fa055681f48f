// Service modules
pub mod ai_service;
pub mod assessment_service;
pub mod credits_service;
pub mod insight_service;
pub mod jwt_service;
pub mod letter_service;
pub mod resume_service;
pub mod storage_service;

pub use ai_service::AiService;
pub use assessment_service::AssessmentService;
pub use credits_service::CreditsService;
pub use insight_service::InsightService;
pub use jwt_service::JwtService;
pub use letter_service::LetterService;
pub use resume_service::ResumeService;
pub use storage_service::StorageService;
