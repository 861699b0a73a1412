use crate::ai::AiError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Search failures, each detected at its origin step and surfaced verbatim.
/// Zero matches is not an error; it is a success with an empty sequence.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    #[error("embedding generation failed")]
    EmbeddingFailed(#[source] AiError),

    #[error("item retrieval failed")]
    RetrievalFailed(#[source] sqlx::Error),

    #[error("failed to decode stored items")]
    DecodeFailed(#[source] sqlx::Error),
}

fn log_error(error: &SearchError) {
    match error {
        SearchError::InvalidRequest(msg) => error!("Rejected search request: {}", msg),
        SearchError::EmbeddingFailed(e) => error!("Embedding generation failed: {}", e),
        SearchError::RetrievalFailed(e) => error!("Search query failed: {}", e),
        SearchError::DecodeFailed(e) => error!("Failed to decode search results: {}", e),
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::EmbeddingFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "Embedding generation failed.".to_string(),
            ),
            Self::RetrievalFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::DecodeFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to decode stored items.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
