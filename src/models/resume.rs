use serde::{Deserialize, Serialize};
use validator::Validate;

use super::common::SuccessResponse;

/// Payload for creating a resume aggregate. Child collections are optional;
/// absent collections simply start empty.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResumeCreateRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(max = 100000))]
    pub content: Option<String>,

    #[validate(length(max = 100))]
    pub template: Option<String>,

    #[validate(length(max = 20))]
    pub accent_color: Option<String>,

    #[validate(nested)]
    pub personal_info: Option<PersonalInfoPayload>,

    #[validate(length(max = 50), nested)]
    pub experiences: Option<Vec<ExperiencePayload>>,

    #[validate(length(max = 50), nested)]
    pub educations: Option<Vec<EducationPayload>>,

    #[validate(length(max = 50), nested)]
    pub projects: Option<Vec<ProjectPayload>>,
}

/// Partial update payload. A child collection that is present replaces the
/// stored set wholesale; an absent (`null`/omitted) collection is left
/// untouched. An explicitly empty list clears the collection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUpdateRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(max = 100000))]
    pub content: Option<String>,

    #[validate(range(min = 0, max = 100))]
    pub ats_score: Option<i32>,

    #[validate(length(max = 100))]
    pub template: Option<String>,

    #[validate(length(max = 20))]
    pub accent_color: Option<String>,

    #[validate(nested)]
    pub personal_info: Option<PersonalInfoPayload>,

    #[validate(length(max = 50), nested)]
    pub experiences: Option<Vec<ExperiencePayload>>,

    #[validate(length(max = 50), nested)]
    pub educations: Option<Vec<EducationPayload>>,

    #[validate(length(max = 50), nested)]
    pub projects: Option<Vec<ProjectPayload>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoPayload {
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[validate(length(max = 255))]
    pub headline: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(max = 5000))]
    pub summary: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 255))]
    pub company: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    #[validate(length(max = 50))]
    pub start_date: Option<String>,
    #[validate(length(max = 50))]
    pub end_date: Option<String>,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EducationPayload {
    #[validate(length(min = 1, max = 255))]
    pub school: String,
    #[validate(length(max = 255))]
    pub degree: Option<String>,
    #[validate(length(max = 255))]
    pub field_of_study: Option<String>,
    #[validate(length(max = 50))]
    pub start_date: Option<String>,
    #[validate(length(max = 50))]
    pub end_date: Option<String>,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResumeVisibilityRequest {
    pub is_public: bool,
}

/// Thumbnail upload: base64 image bytes, stored to the bucket, URL cached
/// on the resume's json blob.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResumeThumbnailRequest {
    #[validate(length(min = 1, max = 4000000))]
    pub data: String,
    #[validate(length(min = 1, max = 100))]
    pub content_type: String,
}

pub type ResumeCreatedResponse = SuccessResponse<ResumeCreatedData>;

/// Only the new identity is returned from create, never the full nested
/// aggregate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeCreatedData {
    pub id: uuid::Uuid,
}

pub type ResumeResponse = SuccessResponse<ResumeAggregate>;
pub type ResumeListResponse = SuccessResponse<Vec<entity::resumes::Model>>;
pub type ThumbnailResponse = SuccessResponse<ThumbnailData>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailData {
    pub url: String,
}

/// Full aggregate readout for the editor UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAggregate {
    pub resume: entity::resumes::Model,
    pub personal_info: Option<entity::personal_infos::Model>,
    pub experiences: Vec<entity::experiences::Model>,
    pub educations: Vec<entity::educations::Model>,
    pub projects: Vec<entity::projects::Model>,
}
