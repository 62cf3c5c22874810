use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{check_closed_range, require_non_blank, ValidationError};

/// A GPS fix as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGps {
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters above sea level
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters
    pub accuracy: Option<f64>,
    pub location_name: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpsRecord {
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl GpsRecord {
    pub const COLLECTION: &'static str = "gps_coordinates";
}

impl NewGps {
    pub fn validate(self) -> Result<GpsRecord, ValidationError> {
        let user_id = require_non_blank("user_id", self.user_id)?;
        let latitude = check_closed_range("latitude", self.latitude, -90.0, 90.0)?;
        let longitude = check_closed_range("longitude", self.longitude, -180.0, 180.0)?;

        Ok(GpsRecord {
            user_id,
            latitude,
            longitude,
            altitude: self.altitude,
            accuracy: self.accuracy,
            location_name: self.location_name,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}
