use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;

use crate::export::BinaryFile;
use crate::storage::{object_key, AssetUploader, UploadError};

const KEY_PREFIX: &str = "thumbnails";

/// Uploads into one bucket and hands back `{public_base}/{bucket}/{key}`.
/// The client is built from explicit credentials in main; nothing here reads
/// the environment.
pub struct S3Uploader {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base: String,
}

impl S3Uploader {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base: String) -> Self {
        Self {
            client,
            bucket,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket, key)
    }
}

#[async_trait]
impl AssetUploader for S3Uploader {
    async fn upload(&self, file: &BinaryFile) -> Result<String, UploadError> {
        if file.bytes.is_empty() {
            return Err(UploadError::Rejected("empty file".to_string()));
        }
        let key = object_key(KEY_PREFIX, &file.filename);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(file.bytes.clone()))
            .content_type(&file.mime)
            .send()
            .await
            .map_err(|e| UploadError::Backend(format!("S3 upload failed: {e}")))?;

        info!("Uploaded {} to s3://{}/{}", file.filename, self.bucket, key);
        Ok(self.public_url(&key))
    }
}
