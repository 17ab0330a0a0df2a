//! Engine tuning configuration.
//!
//! Every constant that shapes the forecast - merge radius, zone radius
//! floor, confidence curve, corridor thresholds - lives here rather than in
//! the algorithm bodies, so the values can be calibrated against real data
//! without touching logic. Defaults are the documented starting points; a
//! deployment may override them from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// Full engine tuning set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub clustering: ClusterSettings,
    pub confidence: ConfidenceSettings,
    pub corridor: CorridorSettings,
}

/// Spatial clustering thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    /// Maximum centroid separation, in meters, at which two clusters merge
    /// into one zone.
    pub merge_threshold_meters: f64,
    /// Radius floor, in meters, so single-sighting zones stay non-degenerate.
    pub min_zone_radius_meters: f64,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            merge_threshold_meters: 150.0,
            min_zone_radius_meters: 25.0,
        }
    }
}

/// Confidence curve constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceSettings {
    /// Distinct sighting days at which the day factor saturates at 1.
    pub target_distinct_days: f64,
    /// Sighting count at which the log-dampened count factor saturates at 1.
    pub count_saturation: f64,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            target_distinct_days: 5.0,
            count_saturation: 10.0,
        }
    }
}

/// Corridor detection thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorSettings {
    /// Minimum distinct days a transition must repeat on before it can be
    /// flagged.
    pub min_repeat_days: usize,
    /// The transition's day count must also exceed this fraction of the
    /// segment pair's total observed days.
    pub min_day_fraction: f64,
}

impl Default for CorridorSettings {
    fn default() -> Self {
        Self {
            min_repeat_days: 2,
            min_day_fraction: 0.5,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file. Missing keys fall back to their
    /// defaults; the result is validated before being returned.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::InvalidConfiguration(format!(
                "Cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: EngineConfig = toml::from_str(&raw).map_err(|e| {
            EngineError::InvalidConfiguration(format!(
                "Cannot parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tuning value is in its legal range.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.clustering.merge_threshold_meters > 0.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "merge_threshold_meters must be positive, got {}",
                self.clustering.merge_threshold_meters
            )));
        }
        if !(self.clustering.min_zone_radius_meters >= 0.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "min_zone_radius_meters must be non-negative, got {}",
                self.clustering.min_zone_radius_meters
            )));
        }
        if !(self.confidence.target_distinct_days >= 1.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "target_distinct_days must be at least 1, got {}",
                self.confidence.target_distinct_days
            )));
        }
        if !(self.confidence.count_saturation > 0.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "count_saturation must be positive, got {}",
                self.confidence.count_saturation
            )));
        }
        if self.corridor.min_repeat_days < 1 {
            return Err(EngineError::InvalidConfiguration(
                "min_repeat_days must be at least 1".to_string(),
            ));
        }
        if !(self.corridor.min_day_fraction >= 0.0 && self.corridor.min_day_fraction < 1.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "min_day_fraction must be in [0, 1), got {}",
                self.corridor.min_day_fraction
            )));
        }
        Ok(())
    }
}
