use crate::{
    app_state::AppState,
    error::{ApiError, Result},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

const SERVICE_KEY_HEADER: &str = "x-service-key";

/// Guards service-to-service routes (the billing webhook) with a shared
/// key. Comparison is against the configured key, not a user token.
pub async fn service_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let presented = request
        .headers()
        .get(SERVICE_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing service key".to_string()))?;

    if presented != state.config.billing.service_key {
        return Err(ApiError::Unauthorized("Invalid service key".to_string()));
    }

    Ok(next.run(request).await)
}
