use axum::{extract::State, Json};
use tracing::instrument;

use crate::{
    app_state::AppState,
    error::Result,
    middleware::UserIdentity,
    models::{
        common::SuccessResponse,
        credits::{CreditStatusData, CreditStatusResponse},
    },
};

/// GET /api/v1/credits
#[instrument(skip(state, identity))]
pub async fn get_credit_status(
    State(state): State<AppState>,
    identity: UserIdentity,
) -> Result<Json<CreditStatusResponse>> {
    let entry = state.credits_service.get_entry(identity.user_id).await?;

    Ok(Json(SuccessResponse::new(CreditStatusData::from(entry))))
}

/// POST /api/v1/credits/provision
///
/// Creates the caller's ledger entry with the signup balance. Idempotent;
/// called by the frontend after first sign-in.
#[instrument(skip(state, identity))]
pub async fn provision_credits(
    State(state): State<AppState>,
    identity: UserIdentity,
) -> Result<Json<CreditStatusResponse>> {
    let entry = state.credits_service.ensure_entry(identity.user_id).await?;

    Ok(Json(SuccessResponse::new(CreditStatusData::from(entry))))
}
