use axum::{extract::State, Json};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    models::{
        common::SuccessResponse,
        credits::{BillingActivateRequest, CreditStatusData, CreditStatusResponse},
    },
};

/// POST /api/v1/billing/activate
///
/// Applies a verified payment event from the webhook receiver: overwrites
/// the user's paid flag and balance. Guarded by the shared service key,
/// not a user token.
#[instrument(skip(state, request))]
pub async fn activate(
    State(state): State<AppState>,
    Json(request): Json<BillingActivateRequest>,
) -> Result<Json<CreditStatusResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let entry = state
        .credits_service
        .set_paid_status(request.user_id, request.is_paid, request.balance)
        .await?;

    info!(
        "Billing activation applied for user {}: is_paid={}",
        request.user_id, request.is_paid
    );

    Ok(Json(SuccessResponse::new(CreditStatusData::from(entry))))
}
