use axum::{extract::State, Json};
use tracing::instrument;
use validator::Validate;

use crate::{
    app_state::AppState,
    error::{ApiError, Result},
    middleware::UserIdentity,
    models::{
        ai::{ImproveTextData, ImproveTextRequest, ImproveTextResponse},
        common::SuccessResponse,
    },
    prompt::PromptSections,
    utils::strip_code_fences,
};

/// POST /api/v1/ai/improve
///
/// Rewrites a single resume bullet or summary. The ledger is consulted
/// before any prompt work; unpaid users with no balance are rejected with
/// the typed OUT_OF_BALANCE error before a provider call is attempted.
#[instrument(skip(state, request))]
pub async fn improve_text(
    State(state): State<AppState>,
    identity: UserIdentity,
    Json(request): Json<ImproveTextRequest>,
) -> Result<Json<ImproveTextResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(format!("Validation error: {}", e)))?;

    let status = state.credits_service.check_admission(identity.user_id).await?;
    if !status.admitted {
        return Err(ApiError::OutOfBalance);
    }

    let instruction = build_improve_prompt(&request);
    let text = state
        .ai_service
        .generate(identity.user_id, &instruction, false)
        .await?;
    let content = strip_code_fences(&text).to_string();

    Ok(Json(SuccessResponse::new(ImproveTextData { content })))
}

fn build_improve_prompt(request: &ImproveTextRequest) -> String {
    let mut context = format!("Current text:\n{}\n", request.current);
    if let Some(role) = &request.role {
        context.push_str(&format!("Target role: {}\n", role));
    }
    if let Some(jd) = &request.job_description {
        context.push_str("Job description:\n");
        context.push_str(jd);
        context.push('\n');
    }

    let sections = PromptSections {
        context: Some(context),
        role: Some("You are an expert resume writer.".to_string()),
        instruction: Some(
            "Rewrite the current text to be more impactful and achievement-oriented.".to_string(),
        ),
        specification: Some(
            "Keep the original meaning, use strong action verbs, quantify where the source \
             material allows, stay within 20% of the original length. Return only the rewritten \
             text."
                .to_string(),
        ),
        performance: Some("Concise and specific; no filler adjectives.".to_string()),
        example: None,
    };

    sections.assemble()
}
