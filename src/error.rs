use crate::models::common::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Out of balance")]
    OutOfBalance,

    #[error("Malformed AI response: {0}")]
    MalformedAiResponse(String),

    #[error("AI provider error: {0}")]
    AIProvider(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
            // Deliberately non-exceptional for clients: the UI routes this
            // code to an upgrade prompt instead of a generic error page.
            ApiError::OutOfBalance => (
                StatusCode::PAYMENT_REQUIRED,
                "OUT_OF_BALANCE",
                "No credits remaining".to_string(),
            ),
            // Recoverable: the provider answered but the payload did not
            // match the expected shape. Clients should offer a retry.
            ApiError::MalformedAiResponse(ref msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALFORMED_AI_RESPONSE",
                msg.clone(),
            ),
            ApiError::AIProvider(ref msg) => {
                tracing::error!("AI provider error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_PROVIDER_ERROR",
                    "AI service temporarily unavailable".to_string(),
                )
            }
            ApiError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::NotFound(ref msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            ApiError::InvalidToken(ref msg) => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", msg.clone())
            }
            ApiError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "EXPIRED_TOKEN",
                "Access token has expired".to_string(),
            ),
            ApiError::Serialization(ref e) => {
                tracing::error!("Serialization error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT_EXCEEDED",
                "Too many requests, please try again later".to_string(),
            ),
            ApiError::Internal(ref e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}

// Helper type for results
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_out_of_balance_envelope() {
        let response = ApiError::OutOfBalance.into_response();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);

        let body = response_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "OUT_OF_BALANCE");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_ai_response_envelope() {
        let response =
            ApiError::MalformedAiResponse("missing field `questions`".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "MALFORMED_AI_RESPONSE");
        assert_eq!(body["error"]["message"], "missing field `questions`");
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak_details() {
        let response = ApiError::Internal(anyhow::anyhow!("db password wrong")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response_body(response).await;
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }
}
