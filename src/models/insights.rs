use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::SuccessResponse;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsightGenerateRequest {
    #[validate(length(min = 1, max = 255))]
    pub industry: String,
}

/// Schema the provider's JSON-mode answer must match. Anything else is a
/// malformed response, surfaced as retryable.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPayload {
    pub growth_rate: f64,
    pub demand_level: String,
    pub market_outlook: String,
    pub top_skills: Vec<String>,
    pub key_trends: Vec<String>,
    pub salary_ranges: Vec<SalaryRange>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub role: String,
    pub min: i64,
    pub max: i64,
    pub median: i64,
}

pub type InsightResponse = SuccessResponse<entity::industry_insights::Model>;
