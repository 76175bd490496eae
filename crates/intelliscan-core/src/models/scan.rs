//! Selected scan file: payload, declared media type, and derived preview.

use base64::Engine;
use bytes::Bytes;
use std::path::Path;

use crate::error::AppError;

/// A user-selected MRI scan image awaiting upload.
///
/// Owned wholesale by one workflow instance: a new selection replaces the
/// previous `ScanFile`, and reset drops it.
#[derive(Debug, Clone)]
pub struct ScanFile {
    bytes: Bytes,
    file_name: String,
    content_type: String,
}

impl ScanFile {
    pub fn new(
        bytes: impl Into<Bytes>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }

    /// Load a scan from a local path, guessing the media type from the
    /// file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::Internal(format!("Failed to read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("scan.jpg")
            .to_string();
        let content_type = guess_content_type(&file_name).to_string();
        Ok(Self::new(bytes, file_name, content_type))
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Encode the payload as a displayable data URL
    /// (`data:<media type>;base64,<payload>`).
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.content_type, encoded)
    }
}

/// Map a file extension to a declared media type. Unknown extensions fall
/// through to `application/octet-stream` and are rejected by validation.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}
