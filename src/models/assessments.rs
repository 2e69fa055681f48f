use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::SuccessResponse;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizGenerateRequest {
    /// Role or skill area, e.g. "Backend Engineering". Mock-interview
    /// question sets use the same request with a behavioral category.
    #[validate(length(min = 1, max = 255))]
    pub category: String,

    #[validate(length(max = 20))]
    pub skills: Vec<String>,

    #[validate(range(min = 1, max = 20))]
    pub question_count: Option<u8>,
}

/// Schema for the provider's JSON-mode question set.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResultRequest {
    #[validate(length(min = 1, max = 255))]
    pub category: String,

    #[validate(range(min = 0.0, max = 100.0))]
    pub quiz_score: f64,

    /// Question set with the user's answers, stored as-is.
    pub questions: serde_json::Value,

    #[validate(length(max = 5000))]
    pub improvement_tip: Option<String>,
}

pub type QuizResponse = SuccessResponse<QuizPayload>;
pub type AssessmentResponse = SuccessResponse<entity::assessments::Model>;
pub type AssessmentListResponse = SuccessResponse<Vec<entity::assessments::Model>>;
