use std::path::Path;

use uuid::Uuid;

use crate::helper::error_chain_fmt;

/// Video container extensions accepted for upload.
pub const ALLOWED_VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "avi", "mov", "mkv", "webm", "m4v"];

/// A collision-free storage name for an uploaded media file.
///
/// The client-supplied base name is never trusted for storage: only its
/// extension survives, lower-cased, appended to a freshly generated UUID.
#[derive(Debug, Clone)]
pub struct MediaName {
    stored_name: String,
    extension: String,
}

#[derive(thiserror::Error)]
pub enum MediaNameError {
    #[error("unsupported media type for `{0}`; allowed extensions: mp4, avi, mov, mkv, webm, m4v")]
    UnsupportedMediaType(String),
}

impl std::fmt::Debug for MediaNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl MediaName {
    /// Allocates a globally-unique storage name from a client-supplied
    /// filename. Two concurrent uploads of the same declared name get
    /// distinct storage names.
    pub fn allocate(declared_filename: &str) -> Result<Self, MediaNameError> {
        let extension = Path::new(declared_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| MediaNameError::UnsupportedMediaType(declared_filename.to_owned()))?;

        if !ALLOWED_VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            return Err(MediaNameError::UnsupportedMediaType(declared_filename.to_owned()));
        }

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);

        Ok(Self {
            stored_name,
            extension,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.stored_name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl std::fmt::Display for MediaName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.stored_name.fmt(f)
    }
}

/// Content type served back for a stored name, derived from its extension.
/// Hand-crafted request paths can carry anything, hence the fallback.
pub fn content_type_for(stored_name: &str) -> &'static str {
    match Path::new(stored_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("m4v") => "video/x-m4v",
        _ => "application/octet-stream",
    }
}
