use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{RelayError, RelayResult};
use crate::state::AppState;

/// Forward `{ messages }` to the completion service with the server-held key.
///
/// The body is parsed by hand so malformed JSON gets the relay's own 400 body
/// rather than axum's rejection. Whatever JSON the upstream returns is passed
/// back verbatim with 200, including upstream error objects.
pub async fn forward_completion(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> RelayResult<Json<Value>> {
    let payload: Value = serde_json::from_slice(&body).map_err(|_| RelayError::InvalidJson)?;

    let messages = payload
        .get("messages")
        .filter(|m| m.is_array())
        .cloned()
        .ok_or(RelayError::MissingMessages)?;

    let api_key = state
        .config
        .openai_api_key
        .as_ref()
        .ok_or(RelayError::MissingApiKey)?;

    let upstream = &state.config.upstream;
    let request_body = json!({
        "model": upstream.model,
        "messages": messages,
        "max_tokens": upstream.max_tokens,
    });

    tracing::debug!(
        model = %upstream.model,
        messages = messages.as_array().map_or(0, Vec::len),
        "Forwarding completion request"
    );

    let response = state
        .http_client
        .post(&upstream.url)
        .bearer_auth(api_key.expose())
        .json(&request_body)
        .send()
        .await
        .map_err(|e| RelayError::Upstream(e.to_string()))?;

    let status = response.status();
    let data: Value = response
        .json()
        .await
        .map_err(|e| RelayError::Upstream(e.to_string()))?;

    if !status.is_success() {
        tracing::warn!(status = %status, "Upstream returned an error status");
    }

    Ok(Json(data))
}

/// Plain `OPTIONS` without CORS request headers, e.g. a reachability probe
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
