//! Corridor detection across adjacent day-part segments.
//!
//! A corridor is habitual directional movement: the animal occupies zone X
//! during one segment and a spatially different zone Y during the next
//! segment of the same calendar day, on enough distinct days that the
//! pattern is not coincidence. Detection is pure counting and thresholding
//! over the per-day occupancy sequence; no path geometry is computed, only
//! the endpoint zones are flagged.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::EngineConfig;
use crate::geo;
use crate::models::Sighting;
use crate::services::clustering::ZoneCluster;

/// Detect recurring zone-to-zone transitions.
///
/// `sightings_by_segment` and `clusters_by_segment` are parallel slices in
/// the fixed segment order; cluster member indices refer into the matching
/// sighting vector. Returns the set of `(segment index, zone index)`
/// endpoints participating in a qualifying corridor.
pub fn detect_corridors(
    sightings_by_segment: &[Vec<Sighting>],
    clusters_by_segment: &[Vec<ZoneCluster>],
    config: &EngineConfig,
) -> HashSet<(usize, usize)> {
    let segment_count = sightings_by_segment.len();

    // Occupancy per calendar day: for each segment, the dominant zone the
    // profile used that day (most sightings; ties to the day's earliest
    // sighting, then the higher-ranked zone).
    let mut daily: BTreeMap<NaiveDate, Vec<Option<usize>>> = BTreeMap::new();

    for seg in 0..segment_count {
        let sightings = &sightings_by_segment[seg];
        let clusters = &clusters_by_segment[seg];

        let mut per_day: HashMap<NaiveDate, HashMap<usize, (usize, NaiveDateTime)>> =
            HashMap::new();
        for (zone_idx, cluster) in clusters.iter().enumerate() {
            for &member in &cluster.members {
                let sighting = &sightings[member];
                let day = sighting.captured_at.date();
                let entry = per_day
                    .entry(day)
                    .or_default()
                    .entry(zone_idx)
                    .or_insert((0, sighting.captured_at));
                entry.0 += 1;
                if sighting.captured_at < entry.1 {
                    entry.1 = sighting.captured_at;
                }
            }
        }

        for (day, zones) in per_day {
            let mut dominant: Option<(usize, (usize, NaiveDateTime))> = None;
            for (zone_idx, stats) in zones {
                let wins = match &dominant {
                    None => true,
                    Some((best_idx, best)) => {
                        stats.0 > best.0
                            || (stats.0 == best.0 && stats.1 < best.1)
                            || (stats.0 == best.0 && stats.1 == best.1 && zone_idx < *best_idx)
                    }
                };
                if wins {
                    dominant = Some((zone_idx, stats));
                }
            }
            let slots = daily
                .entry(day)
                .or_insert_with(|| vec![None; segment_count]);
            slots[seg] = dominant.map(|(zone_idx, _)| zone_idx);
        }
    }

    // Tally distinct transition days per adjacent segment pair and flag
    // the endpoints of transitions that repeat often enough.
    let mut flagged = HashSet::new();
    for pair in 0..segment_count.saturating_sub(1) {
        let mut pair_days = 0usize;
        let mut transition_days: HashMap<(usize, usize), usize> = HashMap::new();

        for occupancy in daily.values() {
            let (Some(from_zone), Some(to_zone)) = (occupancy[pair], occupancy[pair + 1]) else {
                continue;
            };
            pair_days += 1;

            // Zone identities are scoped per segment; "different zone" means
            // a spatially distinct location, not a distinct index.
            let from = &clusters_by_segment[pair][from_zone];
            let to = &clusters_by_segment[pair + 1][to_zone];
            let moved = geo::haversine_distance(&from.centroid, &to.centroid)
                > config.clustering.merge_threshold_meters;
            if moved {
                *transition_days.entry((from_zone, to_zone)).or_insert(0) += 1;
            }
        }

        for ((from_zone, to_zone), day_count) in transition_days {
            if day_count >= config.corridor.min_repeat_days
                && (day_count as f64) > config.corridor.min_day_fraction * pair_days as f64
            {
                flagged.insert((pair, from_zone));
                flagged.insert((pair + 1, to_zone));
            }
        }
    }

    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CameraId, PhotoId};
    use crate::services::{clustering, scoring};

    const BASE_LAT: f64 = 45.0;
    const BASE_LON: f64 = -93.0;
    const METERS_PER_DEG_LAT: f64 = 111_320.0;

    const DUSK: usize = 4;
    const NIGHT: usize = 5;

    fn sighting(photo_id: i64, day: u32, hour: u32, north_m: f64, east_m: f64) -> Sighting {
        Sighting {
            photo_id: PhotoId::new(photo_id),
            captured_at: chrono::NaiveDate::from_ymd_opt(2025, 10, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            camera_id: CameraId::new(1 + (east_m as i64 / 100) + (north_m as i64 / 100)),
            camera_name: "Cam".to_string(),
            latitude: BASE_LAT + north_m / METERS_PER_DEG_LAT,
            longitude: BASE_LON + east_m / (METERS_PER_DEG_LAT * BASE_LAT.to_radians().cos()),
        }
    }

    /// Cluster and rank six segments' worth of sightings the way the
    /// aggregator does before corridor detection.
    fn pipeline(
        by_segment: Vec<Vec<Sighting>>,
        config: &EngineConfig,
    ) -> (Vec<Vec<Sighting>>, Vec<Vec<ZoneCluster>>) {
        let clusters = by_segment
            .iter()
            .map(|sightings| {
                let mut c = clustering::cluster_sightings(sightings, &config.clustering);
                scoring::rank_zones(&mut c);
                c
            })
            .collect();
        (by_segment, clusters)
    }

    fn empty_segments() -> Vec<Vec<Sighting>> {
        vec![Vec::new(); 6]
    }

    #[test]
    fn test_recurring_transition_flags_both_endpoints() {
        let config = EngineConfig::default();
        let mut segments = empty_segments();
        let mut photo = 0;
        // Dusk at camera site A on five days; Night at site B (600 m east)
        // on four of them and site C (600 m north) on the fifth.
        for day in 1..=5u32 {
            photo += 1;
            segments[DUSK].push(sighting(photo, day, 18, 0.0, 0.0));
        }
        for day in 1..=4u32 {
            photo += 1;
            segments[NIGHT].push(sighting(photo, day, 21, 0.0, 600.0));
        }
        photo += 1;
        segments[NIGHT].push(sighting(photo, 5, 21, 600.0, 0.0));

        let (sightings, clusters) = pipeline(segments, &config);
        assert_eq!(clusters[DUSK].len(), 1);
        assert_eq!(clusters[NIGHT].len(), 2);
        // ranked: B (four members) ahead of C (one member)
        assert_eq!(clusters[NIGHT][0].sighting_count(), 4);

        let flagged = detect_corridors(&sightings, &clusters, &config);
        assert!(flagged.contains(&(DUSK, 0)), "source zone A flagged");
        assert!(flagged.contains(&(NIGHT, 0)), "destination zone B flagged");
        assert!(
            !flagged.contains(&(NIGHT, 1)),
            "one-off destination C must not be flagged"
        );
    }

    #[test]
    fn test_single_day_transition_is_never_flagged() {
        let config = EngineConfig::default();
        let mut segments = empty_segments();
        segments[DUSK].push(sighting(1, 1, 18, 0.0, 0.0));
        segments[NIGHT].push(sighting(2, 1, 21, 0.0, 600.0));

        let (sightings, clusters) = pipeline(segments, &config);
        let flagged = detect_corridors(&sightings, &clusters, &config);
        assert!(flagged.is_empty());
    }

    #[test]
    fn test_staying_put_is_not_a_corridor() {
        let config = EngineConfig::default();
        let mut segments = empty_segments();
        // Dusk and Night at the same camera site across four days.
        for day in 1..=4u32 {
            segments[DUSK].push(sighting(day as i64, day, 18, 0.0, 0.0));
            segments[NIGHT].push(sighting(10 + day as i64, day, 21, 10.0, 0.0));
        }

        let (sightings, clusters) = pipeline(segments, &config);
        let flagged = detect_corridors(&sightings, &clusters, &config);
        assert!(flagged.is_empty());
    }

    #[test]
    fn test_minority_transition_fails_fraction_gate() {
        let mut config = EngineConfig::default();
        config.corridor.min_day_fraction = 0.5;
        let mut segments = empty_segments();
        let mut photo = 0;
        // Ten observed days for the Dusk-Night pair, but the A-to-B
        // transition shows on only three of them; the other seven days the
        // animal stays at A.
        for day in 1..=10u32 {
            photo += 1;
            segments[DUSK].push(sighting(photo, day, 18, 0.0, 0.0));
            photo += 1;
            if day <= 3 {
                segments[NIGHT].push(sighting(photo, day, 21, 0.0, 600.0));
            } else {
                segments[NIGHT].push(sighting(photo, day, 21, 5.0, 0.0));
            }
        }

        let (sightings, clusters) = pipeline(segments, &config);
        let flagged = detect_corridors(&sightings, &clusters, &config);
        assert!(
            flagged.is_empty(),
            "3 of 10 days is under the fraction gate"
        );
    }

    #[test]
    fn test_empty_input_has_no_corridors() {
        let config = EngineConfig::default();
        let (sightings, clusters) = pipeline(empty_segments(), &config);
        assert!(detect_corridors(&sightings, &clusters, &config).is_empty());
    }
}
