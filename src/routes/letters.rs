use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    middleware::UserIdentity,
    models::{
        common::{MessageResponse, SuccessResponse},
        letters::{LetterGenerateRequest, LetterListResponse, LetterResponse},
    },
};

/// POST /api/v1/letters
#[instrument(skip(state, request))]
pub async fn generate_letter(
    State(state): State<AppState>,
    identity: UserIdentity,
    Json(request): Json<LetterGenerateRequest>,
) -> Result<Json<LetterResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let letter = state
        .letter_service
        .generate(identity.user_id, request)
        .await?;

    Ok(Json(SuccessResponse::new(letter)))
}

/// GET /api/v1/letters
#[instrument(skip(state, identity))]
pub async fn list_letters(
    State(state): State<AppState>,
    identity: UserIdentity,
) -> Result<Json<LetterListResponse>> {
    let letters = state.letter_service.list(identity.user_id).await?;

    Ok(Json(SuccessResponse::new(letters)))
}

/// GET /api/v1/letters/{id}
#[instrument(skip(state, identity))]
pub async fn get_letter(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<LetterResponse>> {
    let letter = state.letter_service.get(id, identity.user_id).await?;

    Ok(Json(SuccessResponse::new(letter)))
}

/// POST /api/v1/letters/{id}/complete
#[instrument(skip(state, identity))]
pub async fn complete_letter(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<LetterResponse>> {
    let letter = state
        .letter_service
        .mark_completed(id, identity.user_id)
        .await?;

    Ok(Json(SuccessResponse::new(letter)))
}

/// DELETE /api/v1/letters/{id}
#[instrument(skip(state, identity))]
pub async fn delete_letter(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<MessageResponse>>> {
    let deleted = state.letter_service.delete(id, identity.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Cover letter not found".to_string()));
    }

    Ok(Json(SuccessResponse::new(MessageResponse::new(
        "Cover letter deleted",
    ))))
}
