//! Zone probability and segment confidence scoring.

use crate::config::ConfidenceSettings;
use crate::services::clustering::ZoneCluster;

/// Share of a segment's sightings falling in one zone, clamped to 1.
pub fn zone_probability(zone_count: usize, segment_total: usize) -> f64 {
    if segment_total == 0 {
        return 0.0;
    }
    (zone_count as f64 / segment_total as f64).min(1.0)
}

/// Confidence that a segment's zone probabilities are well supported.
///
/// Monotone in both sighting count and distinct sighting days. The day
/// factor saturates at `target_distinct_days`; the count factor is
/// log-dampened and saturates at `count_saturation`, so confidence
/// approaches 1 instead of growing unbounded. A single day's burst of
/// sightings scores below the same count spread across several days.
pub fn confidence_score(
    sighting_count: usize,
    distinct_days: usize,
    settings: &ConfidenceSettings,
) -> f64 {
    if sighting_count == 0 {
        return 0.0;
    }
    let day_factor = (distinct_days as f64 / settings.target_distinct_days).min(1.0);
    let count_factor =
        ((1.0 + sighting_count as f64).ln() / (1.0 + settings.count_saturation).ln()).min(1.0);
    day_factor * count_factor
}

/// Rank a segment's zones: probability (member count) descending, then
/// earliest first-seen timestamp, then centroid latitude. Fully
/// deterministic for identical input.
pub fn rank_zones(clusters: &mut [ZoneCluster]) {
    clusters.sort_by(|a, b| {
        b.members
            .len()
            .cmp(&a.members.len())
            .then(a.first_seen.cmp(&b.first_seen))
            .then(
                a.centroid
                    .latitude
                    .partial_cmp(&b.centroid.latitude)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
}
