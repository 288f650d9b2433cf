//! Axum route handlers for the Resume API.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::edit::{apply_edit, DocumentEdit};
use crate::document::sample::sample_document;
use crate::document::{load_or_default, Normalized, ResumeDocument};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub document: Value,
    pub edit: DocumentEdit,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub document: ResumeDocument,
    pub warning: Option<String>,
}

/// GET /api/v1/resumes/sample
pub async fn handle_sample() -> Json<ResumeDocument> {
    Json(sample_document())
}

/// POST /api/v1/resumes/normalize
///
/// Never fails on a malformed record: defaults come back with a warning.
pub async fn handle_normalize(Json(raw): Json<Value>) -> Json<Normalized> {
    Json(load_or_default(&raw))
}

/// POST /api/v1/resumes/edit
pub async fn handle_edit(Json(request): Json<EditRequest>) -> Result<Json<EditResponse>, AppError> {
    let Normalized { document, warning } = load_or_default(&request.document);
    let document = apply_edit(&document, &request.edit)?;
    Ok(Json(EditResponse { document, warning }))
}
