use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use serde::Serialize;

use crate::export::ExportError;

/// A captured frame, carried as a `data:` URL the way a browser canvas hands
/// it over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

impl RasterImage {
    pub fn from_png(width: u32, height: u32, png: &[u8]) -> Self {
        Self {
            width,
            height,
            data_url: format!("data:image/png;base64,{}", BASE64.encode(png)),
        }
    }
}

/// Upload- or download-ready payload.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl BinaryFile {
    /// Decodes `data:<mime>;base64,<payload>`.
    pub fn from_data_url(data_url: &str, filename: &str) -> Result<Self, ExportError> {
        let malformed = |reason: &str| ExportError::MalformedImageData(reason.to_string());

        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| malformed("missing data: scheme"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| malformed("missing payload separator"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| malformed("payload is not base64-encoded"))?;
        if mime.is_empty() || !mime.contains('/') {
            return Err(malformed("missing mime type"));
        }
        if payload.is_empty() {
            return Err(malformed("empty payload"));
        }
        let bytes = BASE64
            .decode(payload.trim())
            .map_err(|e| malformed(&e.to_string()))?;

        Ok(Self {
            filename: filename.to_string(),
            mime: mime.to_string(),
            bytes: Bytes::from(bytes),
        })
    }
}

/// Converts a captured frame into a named file.
pub fn to_file(image: &RasterImage, filename: &str) -> Result<BinaryFile, ExportError> {
    BinaryFile::from_data_url(&image.data_url, filename)
}
