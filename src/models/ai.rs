use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::SuccessResponse;

/// "Improve with AI" for a single resume bullet or summary paragraph.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImproveTextRequest {
    #[validate(length(min = 1, max = 5000))]
    pub current: String,

    /// Target role the text should be tailored to.
    #[validate(length(max = 255))]
    pub role: Option<String>,

    #[validate(length(max = 20000))]
    pub job_description: Option<String>,
}

pub type ImproveTextResponse = SuccessResponse<ImproveTextData>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveTextData {
    pub content: String,
}
