use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{check_closed_range, require_non_blank, ValidationError};

/// An emotion sample as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSentiment {
    pub user_id: String,
    /// Free-form label: happy, sad, angry, neutral, ...
    pub emotion: String,
    /// 0-1 scale
    pub intensity: f64,
    pub note: Option<String>,
    pub context: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// The validated, storage-ready shape of a sentiment sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub user_id: String,
    pub emotion: String,
    pub intensity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl SentimentRecord {
    pub const COLLECTION: &'static str = "sentiments";
}

impl NewSentiment {
    /// Pure validation: no coercion of out-of-range values, the timestamp
    /// default is the only server-assigned field.
    pub fn validate(self) -> Result<SentimentRecord, ValidationError> {
        let user_id = require_non_blank("user_id", self.user_id)?;
        let emotion = require_non_blank("emotion", self.emotion)?;
        let intensity = check_closed_range("intensity", self.intensity, 0.0, 1.0)?;

        Ok(SentimentRecord {
            user_id,
            emotion,
            intensity,
            note: self.note,
            context: self.context,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}
