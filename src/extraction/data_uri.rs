//! Receipt images as `data:<mime>;base64,<payload>` URIs

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::{FiscalError, FiscalResult};

/// Image types accepted by the extraction service, by file extension
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

/// A validated base64 data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    payload: String,
}

impl DataUri {
    /// Parse and check a data URI; malformed input is a validation error
    pub fn parse(raw: &str) -> FiscalResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(invalid("receipt image is empty"));
        }

        let rest = raw
            .strip_prefix("data:")
            .ok_or_else(|| invalid("expected a 'data:' URI"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing ',' before the payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("payload must be base64 encoded"))?;

        if !mime_type.contains('/') {
            return Err(invalid("missing MIME type"));
        }
        if payload.is_empty() {
            return Err(invalid("image payload is empty"));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| invalid(&format!("payload is not valid base64: {}", e)))?;

        Ok(Self {
            mime_type: mime_type.to_ascii_lowercase(),
            payload: payload.to_string(),
        })
    }

    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> FiscalResult<Self> {
        if bytes.is_empty() {
            return Err(invalid("image file is empty"));
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: STANDARD.encode(bytes),
        })
    }

    /// Read an image file, inferring the MIME type from its extension
    pub fn from_file(path: &Path) -> FiscalResult<Self> {
        let mime_type = mime_for_path(path).ok_or_else(|| {
            invalid(&format!(
                "unsupported image type for {} (expected png, jpg, webp, gif, heic or heif)",
                path.display()
            ))
        })?;
        let bytes = std::fs::read(path)
            .map_err(|e| FiscalError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), mime_type, "loaded receipt image");
        Self::from_bytes(mime_type, &bytes)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload without the header
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.payload)
    }
}

impl FromStr for DataUri {
    type Err = FiscalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

fn invalid(reason: &str) -> FiscalError {
    FiscalError::Validation(format!("Invalid receipt image: {}", reason))
}
