// ABOUTME: Parsing and building of base64 data URIs for scanned documents
// ABOUTME: Accepts JPEG, PNG, GIF, WEBP images and PDF files

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

const SUPPORTED_MEDIA_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];

#[derive(Debug, Error, PartialEq)]
pub enum DataUriError {
    #[error("Not a data URI")]
    MissingPrefix,

    #[error("Data URI is not base64 encoded")]
    NotBase64,

    #[error("Unsupported document type: {0}")]
    UnsupportedMediaType(String),

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// A document inlined as `data:<media type>;base64,<payload>`
#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    media_type: String,
    data: String,
}

impl DataUri {
    pub fn parse(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingPrefix)?;
        let (header, data) = rest.split_once(',').ok_or(DataUriError::MissingPrefix)?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or(DataUriError::NotBase64)?;

        let media_type = normalize_media_type(media_type)?;
        STANDARD
            .decode(data)
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))?;

        Ok(Self {
            media_type,
            data: data.to_string(),
        })
    }

    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Result<Self, DataUriError> {
        Ok(Self {
            media_type: normalize_media_type(media_type)?,
            data: STANDARD.encode(bytes),
        })
    }

    /// Builds a data URI for a file, guessing the media type from its extension
    pub fn from_path_bytes(path: &Path, bytes: &[u8]) -> Result<Self, DataUriError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let media_type = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "pdf" => "application/pdf",
            other => return Err(DataUriError::UnsupportedMediaType(other.to_string())),
        };
        Self::from_bytes(media_type, bytes)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Base64 payload without the header
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == "application/pdf"
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.media_type, self.data)
    }
}

fn normalize_media_type(media_type: &str) -> Result<String, DataUriError> {
    let media_type = media_type.trim().to_ascii_lowercase();
    let media_type = if media_type == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        media_type
    };
    if !SUPPORTED_MEDIA_TYPES.contains(&media_type.as_str()) {
        return Err(DataUriError::UnsupportedMediaType(media_type));
    }
    Ok(media_type)
}
