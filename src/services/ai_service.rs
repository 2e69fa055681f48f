use crate::{
    config::AIConfig,
    error::{ApiError, Result},
    services::CreditsService,
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Gateway for the single outbound text-generation call.
///
/// Every call settles exactly one credit: a reservation is taken before
/// dispatch (closing the check-then-debit race) and returned if the
/// provider never produces a successful response.
pub struct AiService {
    config: AIConfig,
    http_client: reqwest::Client,
    credits: Arc<CreditsService>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl AiService {
    pub fn new(config: &AIConfig, credits: Arc<CreditsService>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(
                config.openrouter.request_timeout_ms,
            ))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            config: config.clone(),
            http_client,
            credits,
        }
    }

    /// Issue one non-streamed generation request on behalf of `user_id`.
    ///
    /// `json_mode` only hints the provider's response format; the returned
    /// text is not validated here. Structured callers parse it through
    /// `utils::parse_ai_json`, and a parse failure after a successful
    /// response does not return the credit.
    #[instrument(skip(self, instruction))]
    pub async fn generate(
        &self,
        user_id: Uuid,
        instruction: &str,
        json_mode: bool,
    ) -> Result<String> {
        // Reservation doubles as the admission check; not-admitted surfaces
        // as the typed OUT_OF_BALANCE error.
        self.credits.reserve(user_id).await?;

        match self.dispatch(instruction, json_mode).await {
            Ok(text) => Ok(text),
            Err(e) => {
                // The provider never answered successfully, so the
                // reservation is returned before the error propagates. A
                // failed refund must not mask the provider error.
                if let Err(refund_err) = self.credits.refund(user_id).await {
                    tracing::error!(
                        "Failed to refund reserved credit for user {}: {}",
                        user_id,
                        refund_err
                    );
                }
                Err(e)
            }
        }
    }

    async fn dispatch(&self, instruction: &str, json_mode: bool) -> Result<String> {
        let request = ChatRequest {
            model: self.config.openrouter.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: instruction.to_string(),
            }],
            max_tokens: 2000,
            temperature: 0.7,
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let mut attempts = 0;
        let mut last_err = None;
        while attempts <= self.config.openrouter.retry_attempts {
            let mut builder = self
                .http_client
                .post(format!(
                    "{}/chat/completions",
                    self.config.openrouter.api_base
                ))
                .header(
                    "Authorization",
                    format!("Bearer {}", self.config.openrouter.api_key),
                );

            if let Some(ref referer) = self.config.openrouter.referer {
                builder = builder.header("HTTP-Referer", referer);
            }
            if let Some(ref title) = self.config.openrouter.app_title {
                builder = builder.header("X-Title", title);
            }

            let response = builder.json(&request).send().await;

            match response {
                Ok(resp) => {
                    if !resp.status().is_success() {
                        let status = resp.status();
                        let text = resp.text().await.unwrap_or_default();
                        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                            attempts += 1;
                            last_err = Some(format!(
                                "Provider error {}: {}",
                                status.as_u16(),
                                text
                            ));
                            tokio::time::sleep(std::time::Duration::from_millis(
                                200 * attempts as u64,
                            ))
                            .await;
                            continue;
                        }
                        return Err(ApiError::AIProvider(format!(
                            "Provider error {}: {}",
                            status.as_u16(),
                            text
                        )));
                    }

                    let chat_response: ChatResponse = resp.json().await.map_err(|e| {
                        ApiError::AIProvider(format!("Failed to parse provider response: {}", e))
                    })?;

                    let content = chat_response
                        .choices
                        .into_iter()
                        .next()
                        .map(|choice| choice.message.content)
                        .ok_or_else(|| {
                            ApiError::AIProvider("Provider returned no choices".to_string())
                        })?;

                    info!(
                        "Generation succeeded: model={}, json_mode={}, content_len={}, attempts={}",
                        self.config.openrouter.model,
                        json_mode,
                        content.len(),
                        attempts
                    );

                    return Ok(content);
                }
                Err(e) => {
                    attempts += 1;
                    last_err = Some(format!("Provider request failed: {}", e));
                    tokio::time::sleep(std::time::Duration::from_millis(200 * attempts as u64))
                        .await;
                }
            }
        }

        Err(ApiError::AIProvider(last_err.unwrap_or_else(|| {
            "Provider request failed".to_string()
        })))
    }
}
