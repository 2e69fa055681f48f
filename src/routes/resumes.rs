use axum::{
    extract::{Path, State},
    Json,
};
use base64::Engine;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    middleware::UserIdentity,
    models::{
        common::{MessageResponse, SuccessResponse},
        resume::{
            ResumeCreateRequest, ResumeCreatedData, ResumeCreatedResponse, ResumeListResponse,
            ResumeResponse, ResumeThumbnailRequest, ResumeUpdateRequest, ResumeVisibilityRequest,
            ThumbnailData, ThumbnailResponse,
        },
    },
};

/// POST /api/v1/resumes
#[instrument(skip(state, request))]
pub async fn create_resume(
    State(state): State<AppState>,
    identity: UserIdentity,
    Json(request): Json<ResumeCreateRequest>,
) -> Result<Json<ResumeCreatedResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let id = state
        .resume_service
        .create(identity.user_id, request)
        .await?;

    Ok(Json(SuccessResponse::new(ResumeCreatedData { id })))
}

/// GET /api/v1/resumes
#[instrument(skip(state, identity))]
pub async fn list_resumes(
    State(state): State<AppState>,
    identity: UserIdentity,
) -> Result<Json<ResumeListResponse>> {
    let resumes = state.resume_service.list(identity.user_id).await?;

    Ok(Json(SuccessResponse::new(resumes)))
}

/// GET /api/v1/resumes/{id}
#[instrument(skip(state, identity))]
pub async fn get_resume(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>> {
    let aggregate = state.resume_service.get(id, identity.user_id).await?;

    Ok(Json(SuccessResponse::new(aggregate)))
}

/// PATCH /api/v1/resumes/{id}
#[instrument(skip(state, request))]
pub async fn update_resume(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(id): Path<Uuid>,
    Json(request): Json<ResumeUpdateRequest>,
) -> Result<Json<SuccessResponse<MessageResponse>>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    state
        .resume_service
        .update(id, identity.user_id, request)
        .await?;

    Ok(Json(SuccessResponse::new(MessageResponse::new(
        "Resume updated",
    ))))
}

/// DELETE /api/v1/resumes/{id}
#[instrument(skip(state, identity))]
pub async fn delete_resume(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<MessageResponse>>> {
    let deleted = state.resume_service.delete(id, identity.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Resume not found".to_string()));
    }

    Ok(Json(SuccessResponse::new(MessageResponse::new(
        "Resume deleted",
    ))))
}

/// POST /api/v1/resumes/{id}/visibility
#[instrument(skip(state, request))]
pub async fn set_visibility(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(id): Path<Uuid>,
    Json(request): Json<ResumeVisibilityRequest>,
) -> Result<Json<SuccessResponse<MessageResponse>>> {
    state
        .resume_service
        .set_visibility(id, identity.user_id, request.is_public)
        .await?;

    Ok(Json(SuccessResponse::new(MessageResponse::new(
        "Visibility updated",
    ))))
}

/// POST /api/v1/resumes/{id}/thumbnail
///
/// Accepts base64 image bytes, stores them in the bucket, and caches the
/// resulting URL on the resume. The replaced object, if any, is deleted
/// from storage once the new URL is in place.
#[instrument(skip(state, request))]
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    identity: UserIdentity,
    Path(id): Path<Uuid>,
    Json(request): Json<ResumeThumbnailRequest>,
) -> Result<Json<ThumbnailResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&request.data)
        .map_err(|e| ApiError::BadRequest(format!("Invalid base64 image data: {}", e)))?;

    let url = state
        .storage_service
        .upload_thumbnail(bytes, &request.content_type, identity.user_id)
        .await?;

    let previous = state
        .resume_service
        .set_thumbnail(id, identity.user_id, &url)
        .await?;

    // Best effort: the new thumbnail is already live, a leaked old object
    // must not fail the request
    if let Some(previous_url) = previous.filter(|p| p != &url) {
        if let Some(key) = state.storage_service.extract_key_from_url(&previous_url) {
            if let Err(e) = state.storage_service.delete_thumbnail(&key).await {
                tracing::warn!("Failed to delete replaced thumbnail {}: {}", key, e);
            }
        }
    }

    Ok(Json(SuccessResponse::new(ThumbnailData { url })))
}
