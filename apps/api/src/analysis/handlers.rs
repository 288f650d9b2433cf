//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::analysis::{
    ats_report, document_text, extract_pdf_text, review_resume, AtsReport, ReviewReport,
};
use crate::document::load_or_default;
use crate::errors::AppError;
use crate::state::AppState;

/// Largest résumé upload accepted by `/analysis/extract`.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Résumé input: extracted text, or a document that is flattened to text.
/// Text wins when both are present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub document: Option<Value>,
}

impl ResumeInput {
    fn into_text(self) -> Result<String, AppError> {
        if let Some(text) = self.resume_text.filter(|t| !t.trim().is_empty()) {
            return Ok(text);
        }
        if let Some(raw) = self.document {
            let normalized = load_or_default(&raw);
            let text = document_text(&normalized.document);
            if !text.is_empty() {
                return Ok(text);
            }
        }
        Err(AppError::Validation(
            "resumeText or a non-empty document is required".to_string(),
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsRequest {
    #[serde(flatten)]
    pub resume: ResumeInput,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub filename: String,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis/review
pub async fn handle_review(
    State(state): State<AppState>,
    Json(request): Json<ResumeInput>,
) -> Result<Json<ReviewReport>, AppError> {
    let text = request.into_text()?;
    let report = review_resume(&text, state.analyzer.as_ref()).await?;
    Ok(Json(report))
}

/// POST /api/v1/analysis/ats
pub async fn handle_ats(
    State(state): State<AppState>,
    Json(request): Json<AtsRequest>,
) -> Result<Json<AtsReport>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    let text = request.resume.into_text()?;
    let report = ats_report(&text, &request.job_description, state.analyzer.as_ref()).await?;
    Ok(Json(report))
}

/// POST /api/v1/analysis/extract
///
/// Multipart upload with a `file` (or `resume`) field holding a PDF.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        debug!(
            "Received field: name='{}', filename={:?}, content_type={:?}",
            name,
            field.file_name(),
            field.content_type()
        );
        if name != "file" && name != "resume" {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "resume.pdf".to_string());
        let is_pdf = filename.to_ascii_lowercase().ends_with(".pdf")
            || field.content_type() == Some("application/pdf");
        if !is_pdf {
            return Err(AppError::Validation(
                "Unsupported file type. Please upload a PDF.".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read file data: {e}")))?;
        let text = extract_pdf_text(data).await?;
        info!("Extracted {} chars from '{}'", text.len(), filename);
        return Ok(Json(ExtractResponse { filename, text }));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}
