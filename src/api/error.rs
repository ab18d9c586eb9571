use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::ListRole;
use crate::services::extractor::ExportError;

/// Body of every error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("{field}: {source}")]
    InvalidUpload {
        field: &'static str,
        #[source]
        source: ExportError,
    },

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Attributes a list loading failure to the upload it came from
    pub fn invalid_upload(role: ListRole, source: ExportError) -> Self {
        AppError::InvalidUpload {
            field: role.field_name(),
            source,
        }
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidUpload { field, source } if source.is_io() => {
                tracing::error!("Failed to read {}: {:?}", field, source);
                internal()
            }
            AppError::InvalidUpload { field, source } => {
                tracing::warn!("Rejected {}: {}", field, source);
                (StatusCode::BAD_REQUEST, format!("{}: {}", field, source))
            }
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal()
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {:?}", e);
                internal()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_message_passes_through() {
        let (status, body) =
            render(AppError::BadRequest("Please upload both files!".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please upload both files!");
    }

    #[tokio::test]
    async fn test_structure_error_names_the_field() {
        let err = AppError::invalid_upload(ListRole::Following, ExportError::InvalidStructure);
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "following_file: Invalid JSON structure");
    }

    #[tokio::test]
    async fn test_io_failures_are_masked() {
        let source = ExportError::Io(std::io::Error::other("disk on fire"));
        let (status, body) = render(AppError::invalid_upload(ListRole::Followers, source)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
    }
}
