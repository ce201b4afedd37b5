//! Coarse file categories derived from MIME types.
//!
//! Computed once from the declared MIME string and carried in API
//! responses, replacing ad-hoc substring checks in consumers.

use serde::{Deserialize, Serialize};

/// Coarse content category of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Raster or vector images.
    Image,
    /// Video containers.
    Video,
    /// Audio streams.
    Audio,
    /// Text, PDF, and office documents.
    Document,
    /// Compressed archives.
    Archive,
    /// Everything else.
    Other,
}

impl FileCategory {
    /// Classify a declared MIME type string.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        // Strip any parameters ("text/plain; charset=utf-8").
        let mime = mime.split(';').next().unwrap_or("").trim();

        if mime.starts_with("image/") {
            return Self::Image;
        }
        if mime.starts_with("video/") {
            return Self::Video;
        }
        if mime.starts_with("audio/") {
            return Self::Audio;
        }
        if mime.starts_with("text/") {
            return Self::Document;
        }

        match mime {
            "application/pdf"
            | "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-powerpoint"
            | "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            | "application/rtf"
            | "application/json"
            | "application/xml" => Self::Document,
            "application/zip"
            | "application/gzip"
            | "application/x-tar"
            | "application/x-7z-compressed"
            | "application/x-rar-compressed"
            | "application/x-bzip2" => Self::Archive,
            _ => Self::Other,
        }
    }
}

impl std::str::FromStr for FileCategory {
    type Err = drive_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "document" => Ok(Self::Document),
            "archive" => Ok(Self::Archive),
            "other" => Ok(Self::Other),
            _ => Err(drive_core::AppError::validation(format!(
                "Invalid file category: '{s}'"
            ))),
        }
    }
}
