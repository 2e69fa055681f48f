use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

const BODY_READ_LIMIT: usize = 1024 * 1024;
const BODY_LOG_LIMIT: usize = 2000;

/// Logs each request/response pair with a correlation id, latency, and a
/// truncated body snapshot.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, BODY_READ_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Failed to read request body: {}", e);
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        body = %truncate_body(&String::from_utf8_lossy(&bytes)),
        "→ Request"
    );

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let status = response.status();
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, BODY_READ_LIMIT).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Failed to read response body: {}", e);
            Bytes::new()
        }
    };

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_ms = %start.elapsed().as_millis(),
        body = %truncate_body(&String::from_utf8_lossy(&bytes)),
        "← Response"
    );

    Response::from_parts(parts, Body::from(bytes))
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    if body.len() <= BODY_LOG_LIMIT {
        body.to_string()
    } else {
        // Find a char boundary at or below the limit
        let mut cut = BODY_LOG_LIMIT;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...[truncated, {} bytes total]", &body[..cut], body.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_body() {
        assert_eq!(truncate_body("  hello  "), "hello");
    }

    #[test]
    fn test_truncate_long_body() {
        let long = "x".repeat(BODY_LOG_LIMIT + 100);
        let truncated = truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(100)));
        assert!(truncated.ends_with("bytes total]"));
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let long = "é".repeat(BODY_LOG_LIMIT);
        let truncated = truncate_body(&long);
        assert!(truncated.contains("...[truncated"));
    }
}
