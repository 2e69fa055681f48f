use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    middleware::UserIdentity,
    models::{
        common::SuccessResponse,
        insights::{InsightGenerateRequest, InsightResponse},
    },
};

/// POST /api/v1/insights
#[instrument(skip(state, request))]
pub async fn generate_insight(
    State(state): State<AppState>,
    identity: UserIdentity,
    Json(request): Json<InsightGenerateRequest>,
) -> Result<Json<InsightResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let insight = state
        .insight_service
        .generate(identity.user_id, &request.industry)
        .await?;

    Ok(Json(SuccessResponse::new(insight)))
}

/// GET /api/v1/insights
#[instrument(skip(state, identity))]
pub async fn list_insights(
    State(state): State<AppState>,
    identity: UserIdentity,
) -> Result<Json<SuccessResponse<Vec<entity::industry_insights::Model>>>> {
    let insights = state.insight_service.list(identity.user_id).await?;

    Ok(Json(SuccessResponse::new(insights)))
}

/// GET /api/v1/insights/{industry}
#[instrument(skip(state, identity))]
pub async fn get_insight(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(industry): Path<String>,
) -> Result<Json<InsightResponse>> {
    let insight = state
        .insight_service
        .get(identity.user_id, &industry)
        .await?;

    Ok(Json(SuccessResponse::new(insight)))
}
