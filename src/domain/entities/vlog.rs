use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::validation::{require_non_blank, ValidationError};

/// A vlog entry referencing an already-hosted video (no file upload).
#[derive(Debug, Clone, Deserialize)]
pub struct NewVlog {
    pub user_id: String,
    pub video_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Seconds
    pub duration: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// The storage-ready shape of a vlog entry.
///
/// The upload path assembles this through the builder: `video_url`,
/// `download_url`, `original_filename` and `file_size` are derived from the
/// persisted blob rather than taken from the client.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct VlogRecord {
    pub user_id: String,
    pub video_url: String,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[builder(default = Utc::now())]
    pub timestamp: DateTime<Utc>,
}

impl VlogRecord {
    pub const COLLECTION: &'static str = "vlogs";
}

impl NewVlog {
    pub fn validate(self) -> Result<VlogRecord, ValidationError> {
        let user_id = require_non_blank("user_id", self.user_id)?;
        let video_url = require_non_blank("video_url", self.video_url)?;

        if let Some(duration) = self.duration {
            // The negated comparison also rejects NaN
            if !(duration >= 0.0) {
                return Err(ValidationError {
                    field: "duration",
                    reason: format!("must be >= 0 seconds, got {}", duration),
                });
            }
        }

        Ok(VlogRecord {
            user_id,
            video_url,
            download_url: None,
            original_filename: None,
            file_size: None,
            title: self.title,
            description: self.description,
            duration: self.duration,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}
