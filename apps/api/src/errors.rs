use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::document::edit::EditError;
use crate::document::DocumentError;
use crate::export::ExportError;
use crate::llm_client::LlmError;
use crate::storage::UploadError;

/// User-facing text for any failed capture, print or upload.
pub const EXPORT_FAILED_MESSAGE: &str = "export failed, please retry";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Capture, print or upload failure. The cause is logged, never returned.
    #[error("Export error: {0}")]
    Export(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    EXPORT_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                let status = match e {
                    LlmError::RateLimited { .. } | LlmError::Api { status: 429, .. } => {
                        StatusCode::TOO_MANY_REQUESTS
                    }
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, "LLM_ERROR", e.user_message())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        AppError::UnprocessableEntity(e.to_string())
    }
}

impl From<EditError> for AppError {
    fn from(e: EditError) -> Self {
        match e {
            EditError::Document(inner) => inner.into(),
            EditError::Serialize(inner) => AppError::Internal(inner.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::MalformedImageData(_) => AppError::UnprocessableEntity(e.to_string()),
            ExportError::ExportInProgress(_) => AppError::Conflict(e.to_string()),
            ExportError::CaptureFailure(_) | ExportError::Print(_) => {
                AppError::Export(e.to_string())
            }
        }
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        AppError::Export(e.to_string())
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::EmptyInput(_) => AppError::Validation(e.to_string()),
            AnalysisError::Extraction(_) | AnalysisError::NoText => {
                AppError::UnprocessableEntity(e.to_string())
            }
            AnalysisError::Model(inner) => AppError::Llm(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_export_failures_hide_the_cause() {
        let err: AppError = ExportError::CaptureFailure("oklch() unsupported".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "EXPORT_FAILED");
        assert_eq!(body["error"]["message"], EXPORT_FAILED_MESSAGE);
    }

    #[test]
    fn test_export_error_status_mapping() {
        let malformed: AppError = ExportError::MalformedImageData("empty payload".into()).into();
        assert_eq!(
            malformed.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let busy: AppError = ExportError::ExportInProgress("resume-1".into()).into();
        assert_eq!(busy.into_response().status(), StatusCode::CONFLICT);
        let upload: AppError = UploadError::Backend("bucket gone".into()).into();
        assert_eq!(
            upload.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_analysis_error_mapping() {
        let empty: AppError = AnalysisError::EmptyInput("resume text").into();
        assert_eq!(empty.into_response().status(), StatusCode::BAD_REQUEST);
        let limited: AppError = AnalysisError::Model(LlmError::RateLimited { retries: 3 }).into();
        assert_eq!(
            limited.into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        let down: AppError = AnalysisError::Model(LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        })
        .into();
        assert_eq!(down.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_edit_error_mapping() {
        let unknown: AppError = EditError::UnknownSection("hobbies".into()).into();
        assert_eq!(unknown.into_response().status(), StatusCode::BAD_REQUEST);
        let malformed: AppError = EditError::Document(DocumentError::Malformed {
            reason: "skills must be a list".into(),
        })
        .into();
        assert_eq!(
            malformed.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
