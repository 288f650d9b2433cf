// Upload hand-off for exported files. Handlers only see `Arc<dyn AssetUploader>`;
// the S3 implementation is wired in main, and tests use an in-memory one.

pub mod s3;

use async_trait::async_trait;
use thiserror::Error;

use crate::export::BinaryFile;

pub use s3::S3Uploader;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload rejected: {0}")]
    Rejected(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Stores a file and returns the URL it can be fetched from.
#[async_trait]
pub trait AssetUploader: Send + Sync {
    async fn upload(&self, file: &BinaryFile) -> Result<String, UploadError>;
}

/// Object key for an uploaded asset: `thumbnails/<uuid>-<filename>`.
pub fn object_key(prefix: &str, filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '-' })
        .collect();
    format!("{prefix}/{}-{safe}", uuid::Uuid::new_v4())
}
