use std::sync::Arc;

use crate::export::ExportPipeline;
use crate::llm_client::TextModel;
use crate::storage::AssetUploader;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Thumbnail/PDF exporter; also tracks which documents are mid-export.
    pub exports: ExportPipeline,
    /// Where exported thumbnails go. S3 in production.
    pub uploader: Arc<dyn AssetUploader>,
    /// Review and ATS analysis. `LlmClient` in production.
    pub analyzer: Arc<dyn TextModel>,
}
