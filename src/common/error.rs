// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// The application error taxonomy. Browser-facing paths answer with plain
// text; the JSON API wraps the same variants through `ApiError`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invoice not found")]
    InvoiceNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid payload")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Template error")]
    TemplateError(#[from] tera::Error),

    #[error("Invalid multipart request")]
    MultipartError(#[from] axum::extract::multipart::MultipartError),

    #[error("PDF font not found: {0}")]
    FontNotFound(String),

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn to_api_error(self) -> ApiError {
        ApiError(self)
    }

    /// Maps a variant to its outward status and message. Store and
    /// rendering failures are logged here with full detail and surface only
    /// as a generic message.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::InvoiceNotFound => (StatusCode::NOT_FOUND, "Invoice not found".to_string()),
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::ValidationError(_) | AppError::MultipartError(_) => {
                (StatusCode::BAD_REQUEST, "Invalid payload".to_string())
            }
            e => {
                tracing::error!("Internal server error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, message).into_response()
    }
}

/// JSON-bodied twin of `AppError` for the `/api` surface.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
