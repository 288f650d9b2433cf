//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::document::SectionKind;
use crate::errors::AppError;
use crate::export::BinaryFile;
use crate::state::AppState;
use crate::templates::handlers::{render_document, Rendered};

const THUMBNAIL_FILENAME: &str = "thumbnail.png";
const PDF_FILENAME: &str = "resume.pdf";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub document: Value,
    /// Serializes exports of one résumé. A fresh key is used when absent.
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub section_order: Option<Vec<SectionKind>>,
}

impl ExportRequest {
    fn key(&self) -> String {
        self.resume_id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    fn resume_id(&self) -> Option<&str> {
        self.resume_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    fn filename(&self, fallback: &str) -> String {
        self.filename
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// `resume-<id>.png` for a known résumé.
    fn thumbnail_filename(&self) -> String {
        match self.resume_id() {
            Some(id) => self.filename(&format!("resume-{id}.png")),
            None => self.filename(THUMBNAIL_FILENAME),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub thumbnail_link: String,
}

fn file_response(file: BinaryFile) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", file.filename.replace('"', ""));
    (
        [
            (header::CONTENT_TYPE, file.mime),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}

/// POST /api/v1/export/thumbnail
pub async fn handle_thumbnail(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let key = request.key();
    let filename = request.thumbnail_filename();
    // Exports always capture at natural size; the transform is display-only.
    let Rendered { tree, .. } = render_document(&request.document, 0.0, request.section_order);
    let file = state.exports.thumbnail(&key, tree, &filename).await?;
    Ok(file_response(file))
}

/// POST /api/v1/export/thumbnail/upload
pub async fn handle_thumbnail_upload(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<UploadResponse>, AppError> {
    let key = request.key();
    let filename = request.thumbnail_filename();
    let Rendered { tree, .. } = render_document(&request.document, 0.0, request.section_order);
    // The slot stays claimed through the upload.
    let slot = state.exports.begin(&key)?;
    let (file, _slot) = state.exports.thumbnail_in(slot, tree, &filename).await?;
    let thumbnail_link = state.uploader.upload(&file).await?;
    info!(key = %key, link = %thumbnail_link, "thumbnail uploaded");
    Ok(Json(UploadResponse { thumbnail_link }))
}

/// POST /api/v1/export/pdf
pub async fn handle_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let key = request.key();
    let filename = request.filename(PDF_FILENAME);
    let Rendered { tree, .. } = render_document(&request.document, 0.0, request.section_order);
    let file = state.exports.pdf(&key, tree, &filename).await?;
    Ok(file_response(file))
}
