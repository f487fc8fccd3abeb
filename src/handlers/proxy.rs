use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::services::backend::backend_error_message;
use crate::state::AppState;

/// Full `Authorization` value, provided it carries a non-empty bearer token.
#[allow(clippy::result_large_err)]
fn bearer_header(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    match auth.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(auth),
        _ => Err(AppError::Unauthorized),
    }
}

// POST /api/notifications/email
pub async fn forward_email(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    forward(
        &state,
        &state.config.email_forward_path,
        &headers,
        body,
        "Failed to send email",
    )
    .await
}

// POST /api/webhooks/message
pub async fn forward_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    forward(
        &state,
        &state.config.message_forward_path,
        &headers,
        body,
        "Failed to forward message",
    )
    .await
}

async fn forward(
    state: &AppState,
    path: &str,
    headers: &HeaderMap,
    body: Bytes,
    fallback: &str,
) -> Result<Response, AppError> {
    let auth = bearer_header(headers)?;
    let body: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
    let request_id = Uuid::new_v4();
    let url = state.config.backend_endpoint(path);

    tracing::info!(%request_id, path, "forwarding request to backend");

    let resp = state
        .http
        .post(&url)
        .header(header::AUTHORIZATION, auth)
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(%request_id, error = %e, "backend unreachable");
            AppError::Transport(fallback.to_string())
        })?;

    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let text = resp.text().await.map_err(|e| {
        tracing::error!(%request_id, error = %e, "failed to read backend response");
        AppError::Transport(fallback.to_string())
    })?;
    let payload = serde_json::from_str::<serde_json::Value>(&text).ok();

    if status.is_success() {
        tracing::info!(%request_id, status = status.as_u16(), "backend accepted request");
        let payload = payload.unwrap_or_else(|| serde_json::json!({ "ok": true }));
        return Ok((status, Json(payload)).into_response());
    }

    let message = payload
        .as_ref()
        .and_then(backend_error_message)
        .unwrap_or_else(|| fallback.to_string());
    tracing::warn!(%request_id, status = status.as_u16(), message = %message, "backend rejected request");
    Err(AppError::Upstream { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_header() {
        let mut headers = HeaderMap::new();
        assert!(bearer_header(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_header(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(bearer_header(&headers).is_err());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok-1"));
        assert_eq!(bearer_header(&headers).unwrap(), "Bearer tok-1");
    }
}
