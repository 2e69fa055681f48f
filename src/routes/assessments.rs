use axum::{extract::State, Json};
use tracing::instrument;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    middleware::UserIdentity,
    models::{
        assessments::{
            AssessmentListResponse, AssessmentResponse, AssessmentResultRequest,
            QuizGenerateRequest, QuizResponse,
        },
        common::SuccessResponse,
    },
};

/// POST /api/v1/assessments/quiz
#[instrument(skip(state, request))]
pub async fn generate_quiz(
    State(state): State<AppState>,
    identity: UserIdentity,
    Json(request): Json<QuizGenerateRequest>,
) -> Result<Json<QuizResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let quiz = state
        .assessment_service
        .generate_quiz(identity.user_id, request)
        .await?;

    Ok(Json(SuccessResponse::new(quiz)))
}

/// POST /api/v1/assessments/result
#[instrument(skip(state, request))]
pub async fn save_result(
    State(state): State<AppState>,
    identity: UserIdentity,
    Json(request): Json<AssessmentResultRequest>,
) -> Result<Json<AssessmentResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let assessment = state
        .assessment_service
        .save_result(identity.user_id, request)
        .await?;

    Ok(Json(SuccessResponse::new(assessment)))
}

/// GET /api/v1/assessments
#[instrument(skip(state, identity))]
pub async fn list_assessments(
    State(state): State<AppState>,
    identity: UserIdentity,
) -> Result<Json<AssessmentListResponse>> {
    let assessments = state.assessment_service.list(identity.user_id).await?;

    Ok(Json(SuccessResponse::new(assessments)))
}
