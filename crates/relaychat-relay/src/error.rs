use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Request must include a messages array")]
    MissingMessages,

    #[error("OpenAI API key not configured in relay")]
    MissingApiKey,

    #[error("Error contacting OpenAI")]
    Upstream(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RelayError::InvalidJson | RelayError::MissingMessages => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            RelayError::MissingApiKey => {
                tracing::error!("Rejected request: OPENAI_API_KEY is not set");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
            RelayError::Upstream(ref details) => {
                tracing::error!(details = %details, "Upstream call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": self.to_string(), "details": details }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type RelayResult<T> = Result<T, RelayError>;
