//! Turns a rendered tree into files: a PNG thumbnail of the first page for
//! previews and uploads, and a paginated vector PDF for printing.

pub mod file;
pub mod handlers;
pub mod pipeline;
pub mod print;
pub mod raster;
pub mod sanitize;

use thiserror::Error;

pub use file::{to_file, BinaryFile, RasterImage};
pub use pipeline::ExportPipeline;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("capture failed: {0}")]
    CaptureFailure(String),

    #[error("malformed image data: {0}")]
    MalformedImageData(String),

    #[error("an export for '{0}' is already running")]
    ExportInProgress(String),

    #[error("pdf generation failed: {0}")]
    Print(String),
}
