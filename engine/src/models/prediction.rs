//! Forecast output shapes.
//!
//! These are the detached values handed back to callers; nothing in them
//! references engine state. Field names serialize in camelCase so a JSON
//! rendering matches the documented interface exactly, with timestamps in
//! ISO-8601 UTC and coordinates in decimal degrees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ProfileId;

/// A spatial cluster of sightings within one day-part segment.
///
/// Derived fresh on every prediction run; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Synthesized display name, e.g. "Near North Field Cam".
    pub name: String,
    /// Centroid latitude in decimal degrees.
    pub latitude: f64,
    /// Centroid longitude in decimal degrees.
    pub longitude: f64,
    /// Maximum member distance from the centroid, floored for single-sighting
    /// zones so they stay visually non-degenerate.
    pub radius_meters: f64,
    pub sighting_count: usize,
    /// Share of the segment's sightings that fall in this zone, 0-1.
    pub probability: f64,
    /// True when this zone is an endpoint of a recurring movement corridor.
    pub is_corridor_prediction: bool,
}

/// Forecast for one day-part segment, with its zones ranked by probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSegmentPrediction {
    /// Segment display name ("Dawn", "Morning", ...).
    pub segment: String,
    /// Half-open hour range `[start_hour, end_hour)` in 24h local time.
    pub start_hour: u8,
    pub end_hour: u8,
    pub sighting_count: usize,
    /// 0-1 measure of how well-supported the zone probabilities are,
    /// favoring sightings spread across many days over a single burst.
    pub confidence_score: f64,
    pub zones: Vec<Zone>,
}

/// Aggregate root of one prediction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub profile_id: ProfileId,
    pub profile_name: String,
    pub property_name: String,
    pub total_sightings: usize,
    /// Timestamp of the run that produced this forecast.
    pub prediction_date: DateTime<Utc>,
    /// Segments in fixed chronological order (Dawn first, Night last),
    /// never sorted by sighting volume.
    pub segments: Vec<TimeSegmentPrediction>,
}
