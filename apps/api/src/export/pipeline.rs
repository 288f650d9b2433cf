//! Export orchestration: at most one export per document at a time, with the
//! CPU-bound capture and PDF work moved off the async runtime.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::export::file::{to_file, BinaryFile};
use crate::export::{print, raster, ExportError};
use crate::layout::RenderedTree;

pub const THUMBNAIL_MIME: &str = "image/png";
pub const PDF_MIME: &str = "application/pdf";

#[derive(Clone)]
pub struct ExportPipeline {
    pixel_ratio: f32,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Holds a document's export slot; releases it on drop.
pub struct InFlightGuard {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl InFlightGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}

impl ExportPipeline {
    pub fn new(pixel_ratio: f32) -> Self {
        Self {
            pixel_ratio,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Claims the export slot for `key`. A second claim while the first guard
    /// is alive is rejected rather than queued.
    pub fn begin(&self, key: &str) -> Result<InFlightGuard, ExportError> {
        let mut in_flight = self.in_flight.lock();
        if !in_flight.insert(key.to_string()) {
            warn!(key, "export already in flight; rejecting");
            return Err(ExportError::ExportInProgress(key.to_string()));
        }
        Ok(InFlightGuard {
            key: key.to_string(),
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_exporting(&self, key: &str) -> bool {
        self.in_flight.lock().contains(key)
    }

    /// First-page PNG thumbnail of `tree`.
    pub async fn thumbnail(
        &self,
        key: &str,
        tree: RenderedTree,
        filename: &str,
    ) -> Result<BinaryFile, ExportError> {
        let slot = self.begin(key)?;
        let (file, _slot) = self.thumbnail_in(slot, tree, filename).await?;
        Ok(file)
    }

    /// Captures under a slot the caller already holds. The slot moves into the
    /// blocking capture, so it stays claimed until the capture ends even if the
    /// caller is dropped, and comes back with the file for follow-up work.
    pub async fn thumbnail_in(
        &self,
        slot: InFlightGuard,
        tree: RenderedTree,
        filename: &str,
    ) -> Result<(BinaryFile, InFlightGuard), ExportError> {
        let pixel_ratio = self.pixel_ratio;
        let template = tree.template_id.clone();

        let (image, slot) = tokio::task::spawn_blocking(move || {
            let mut root = tree.root;
            raster::capture(&mut root, pixel_ratio).map(|image| (image, slot))
        })
        .await
        .map_err(|e| ExportError::CaptureFailure(format!("capture task failed: {e}")))??;

        let file = to_file(&image, filename)?;
        info!(
            key = slot.key(),
            template = %template,
            width = image.width,
            height = image.height,
            bytes = file.bytes.len(),
            "thumbnail exported"
        );
        Ok((file, slot))
    }

    /// Paginated vector PDF of `tree`.
    pub async fn pdf(
        &self,
        key: &str,
        tree: RenderedTree,
        filename: &str,
    ) -> Result<BinaryFile, ExportError> {
        let slot = self.begin(key)?;

        let bytes = tokio::task::spawn_blocking(move || {
            let bytes = print::write_pdf(&tree);
            drop(slot);
            bytes
        })
        .await
        .map_err(|e| ExportError::Print(format!("pdf task failed: {e}")))??;

        info!(key, bytes = bytes.len(), "pdf exported");
        Ok(BinaryFile {
            filename: filename.to_string(),
            mime: PDF_MIME.to_string(),
            bytes: bytes.into(),
        })
    }
}
