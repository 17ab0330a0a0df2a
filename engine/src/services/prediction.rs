//! Prediction assembly: the full forecast pipeline for one profile.
//!
//! Orchestrates load, day-part assignment, per-segment clustering, scoring,
//! corridor detection and final aggregation. One run is read-only: a single
//! load from the repository followed by pure in-memory computation, with no
//! shared mutable state across concurrent runs and no caching between them.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::db::checksum;
use crate::db::repository::HistoryRepository;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CameraId, PredictionResult, Profile, ProfileId, PropertyConfig, Sighting,
    TimeSegmentPrediction, Zone,
};
use crate::segments::{SegmentTable, TimeSegment};
use crate::services::clustering::{self, ZoneCluster};
use crate::services::{corridors, loader, scoring};

/// Compute a forecast from an already-loaded history.
///
/// Pure and deterministic: the same inputs always produce the same result.
/// Sparse or empty history is a valid input; the only failure modes are a
/// degenerate day-part configuration or out-of-range tuning values.
pub fn compute_prediction(
    profile: &Profile,
    property: &PropertyConfig,
    sightings: &[Sighting],
    config: &EngineConfig,
    prediction_date: DateTime<Utc>,
) -> EngineResult<PredictionResult> {
    config.validate()?;
    let table = SegmentTable::build(property)?;

    // assign each sighting to its day-part, preserving capture order
    let mut by_segment: Vec<Vec<Sighting>> = vec![Vec::new(); TimeSegment::ORDERED.len()];
    for sighting in sightings {
        let segment = table.segment_for(&sighting.captured_at);
        by_segment[segment.index()].push(sighting.clone());
    }

    // cluster and rank each segment independently
    let clusters_by_segment: Vec<Vec<ZoneCluster>> = by_segment
        .iter()
        .map(|segment_sightings| {
            let mut clusters =
                clustering::cluster_sightings(segment_sightings, &config.clustering);
            scoring::rank_zones(&mut clusters);
            clusters
        })
        .collect();

    let flagged = corridors::detect_corridors(&by_segment, &clusters_by_segment, config);

    let mut segments = Vec::with_capacity(TimeSegment::ORDERED.len());
    for (idx, segment) in TimeSegment::ORDERED.iter().enumerate() {
        let span = table.span(*segment);
        let segment_sightings = &by_segment[idx];
        let distinct_days: HashSet<_> = segment_sightings
            .iter()
            .map(|s| s.captured_at.date())
            .collect();

        let zones = clusters_by_segment[idx]
            .iter()
            .enumerate()
            .map(|(zone_idx, cluster)| Zone {
                name: zone_name(segment_sightings, cluster),
                latitude: cluster.centroid.latitude,
                longitude: cluster.centroid.longitude,
                radius_meters: cluster.radius_meters,
                sighting_count: cluster.sighting_count(),
                probability: scoring::zone_probability(
                    cluster.sighting_count(),
                    segment_sightings.len(),
                ),
                is_corridor_prediction: flagged.contains(&(idx, zone_idx)),
            })
            .collect();

        segments.push(TimeSegmentPrediction {
            segment: segment.label().to_string(),
            start_hour: span.start_hour,
            end_hour: span.end_hour(),
            sighting_count: segment_sightings.len(),
            confidence_score: scoring::confidence_score(
                segment_sightings.len(),
                distinct_days.len(),
                &config.confidence,
            ),
            zones,
        });
    }

    Ok(PredictionResult {
        profile_id: profile.profile_id,
        profile_name: profile.name.clone(),
        property_name: profile.property_name.clone(),
        total_sightings: sightings.len(),
        prediction_date,
        segments,
    })
}

/// Synthesize a zone display name from its dominant camera (most member
/// sightings; ties to the lower camera id).
fn zone_name(sightings: &[Sighting], cluster: &ZoneCluster) -> String {
    let mut counts: HashMap<CameraId, usize> = HashMap::new();
    for &member in &cluster.members {
        *counts.entry(sightings[member].camera_id).or_insert(0) += 1;
    }
    let dominant = counts
        .into_iter()
        .min_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .map(|(camera_id, _)| camera_id);
    let name = dominant
        .and_then(|camera_id| {
            cluster
                .members
                .iter()
                .map(|&m| &sightings[m])
                .find(|s| s.camera_id == camera_id)
                .map(|s| s.camera_name.clone())
        })
        .unwrap_or_else(|| "Unknown".to_string());
    format!("Near {}", name)
}

/// Run the full prediction pipeline for one profile.
///
/// Loads the profile, its property configuration and the sighting history,
/// then computes the forecast. Loader and configuration errors propagate
/// unchanged; an empty history still yields a well-formed result. The loads
/// race `cancel`; once computation starts the run always finishes.
///
/// # Arguments
/// * `repo` - storage collaborator
/// * `profile_id` - the tracked animal to forecast
/// * `config` - engine tuning values
/// * `cancel` - caller-supplied cancellation signal; aborts the whole run
///   with no partial result
pub async fn get_prediction<R: HistoryRepository>(
    repo: &R,
    profile_id: ProfileId,
    config: &EngineConfig,
    cancel: &CancellationToken,
) -> EngineResult<PredictionResult> {
    let (profile, property) = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(EngineError::Cancelled),
        loaded = loader::load_profile(repo, profile_id) => loaded?,
    };
    let sightings = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(EngineError::Cancelled),
        loaded = loader::load_sightings(repo, profile_id) => loaded?,
    };

    info!(
        "Prediction run for profile {} ({}): {} sightings, history version {}",
        profile_id.value(),
        profile.name,
        sightings.len(),
        &checksum::history_checksum(&sightings)[..12]
    );

    compute_prediction(&profile, &property, &sightings, config, Utc::now())
}
