use serde::Deserialize;
use validator::Validate;

use super::common::SuccessResponse;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LetterGenerateRequest {
    #[validate(length(min = 1, max = 255))]
    pub company_name: String,

    #[validate(length(min = 1, max = 255))]
    pub job_title: String,

    #[validate(length(max = 20000))]
    pub job_description: Option<String>,

    /// Candidate background the letter should draw on (skills, years of
    /// experience, notable work).
    #[validate(length(max = 10000))]
    pub user_background: Option<String>,

    #[validate(length(max = 100))]
    pub tone: Option<String>,
}

pub type LetterResponse = SuccessResponse<entity::cover_letters::Model>;
pub type LetterListResponse = SuccessResponse<Vec<entity::cover_letters::Model>>;
