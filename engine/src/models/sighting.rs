//! The immutable sighting fact.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ids::{CameraId, PhotoId};
use crate::geo::GeoPoint;

/// One photo capture event attributed to a profile.
///
/// Created once when loaded from history and never mutated; owned exclusively
/// by the pipeline run that loaded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    pub photo_id: PhotoId,
    /// Capture wall time, already normalized to the property's time zone by
    /// the loading adapter. Calendar-day grouping relies on this.
    pub captured_at: NaiveDateTime,
    pub camera_id: CameraId,
    pub camera_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Sighting {
    /// Camera location of this capture.
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
