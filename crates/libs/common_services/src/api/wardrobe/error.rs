use crate::ai::AiError;
use crate::database::DbError;
use crate::media::MediaError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WardrobeError {
    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("Clothing item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("AI analysis failed")]
    AnalysisFailed(#[source] AiError),

    #[error("embedding generation failed")]
    EmbeddingFailed(#[source] AiError),

    #[error("media storage failed")]
    Media(#[from] MediaError),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &WardrobeError) {
    match error {
        WardrobeError::Database(e) => error!("Database query failed: {}", e),
        WardrobeError::AnalysisFailed(e) => error!("AI analysis failed: {}", e),
        WardrobeError::EmbeddingFailed(e) => error!("Embedding generation failed: {}", e),
        WardrobeError::Media(e) => error!("Media storage failed: {}", e),
        WardrobeError::Internal(e) => error!("Internal error: {}", e),
        WardrobeError::ItemNotFound(_) | WardrobeError::InvalidUpload(_) => {}
    }
}

impl IntoResponse for WardrobeError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::ItemNotFound(item_id) => (
                StatusCode::NOT_FOUND,
                format!("Clothing item not found: {item_id}"),
            ),
            Self::InvalidUpload(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::AnalysisFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "AI analysis failed.".to_string(),
            ),
            Self::EmbeddingFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "Embedding generation failed.".to_string(),
            ),
            Self::Media(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Media storage failed.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for WardrobeError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(err) => Self::Database(err),
            DbError::SerdeJson(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}
