//! Greedy spatial clustering of sightings into zones.
//!
//! Within one day-part segment, every sighting starts as its own cluster;
//! the closest pair of clusters (centroid to centroid, great-circle) merges
//! while their distance stays inside the configured threshold, with the
//! centroid recomputed as the arithmetic mean of member coordinates after
//! each merge. Ties on distance resolve by larger combined member count,
//! then lower camera id, then earlier capture time, so zone growth order is
//! fully deterministic.
//!
//! O(n^2) per merge scan; sighting volumes are per-profile and bounded, so
//! no spatial index is used.

use chrono::NaiveDateTime;

use crate::config::ClusterSettings;
use crate::geo::{self, GeoPoint};
use crate::models::{CameraId, Sighting};

/// One spatial cluster of sightings within a single time segment.
#[derive(Debug, Clone)]
pub struct ZoneCluster {
    /// Indices into the segment's sighting slice, ascending.
    pub members: Vec<usize>,
    pub centroid: GeoPoint,
    /// Maximum member distance from the centroid, floored by configuration.
    pub radius_meters: f64,
    /// Lowest camera id among members; tie-break anchor.
    pub min_camera_id: CameraId,
    /// Earliest capture time among members.
    pub first_seen: NaiveDateTime,
}

impl ZoneCluster {
    pub fn sighting_count(&self) -> usize {
        self.members.len()
    }
}

struct Cluster {
    members: Vec<usize>,
    centroid: GeoPoint,
    min_camera_id: CameraId,
    first_seen: NaiveDateTime,
}

/// Merge-candidate ordering: closer first, then larger combined member
/// count, then lower camera id, then earlier capture.
fn is_better(
    candidate: (f64, usize, CameraId, NaiveDateTime),
    incumbent: (f64, usize, CameraId, NaiveDateTime),
) -> bool {
    if candidate.0 != incumbent.0 {
        return candidate.0 < incumbent.0;
    }
    if candidate.1 != incumbent.1 {
        return candidate.1 > incumbent.1;
    }
    if candidate.2 != incumbent.2 {
        return candidate.2 < incumbent.2;
    }
    candidate.3 < incumbent.3
}

/// Cluster one segment's sightings into zones.
///
/// Zero sightings produce zero clusters; a single sighting produces one
/// cluster whose radius is the configured floor.
pub fn cluster_sightings(sightings: &[Sighting], settings: &ClusterSettings) -> Vec<ZoneCluster> {
    let mut clusters: Vec<Cluster> = sightings
        .iter()
        .enumerate()
        .map(|(i, s)| Cluster {
            members: vec![i],
            centroid: s.location(),
            min_camera_id: s.camera_id,
            first_seen: s.captured_at,
        })
        .collect();

    loop {
        let mut best: Option<((f64, usize, CameraId, NaiveDateTime), (usize, usize))> = None;
        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let dist = geo::haversine_distance(&clusters[i].centroid, &clusters[j].centroid);
                if dist > settings.merge_threshold_meters {
                    continue;
                }
                let key = (
                    dist,
                    clusters[i].members.len() + clusters[j].members.len(),
                    clusters[i].min_camera_id.min(clusters[j].min_camera_id),
                    clusters[i].first_seen.min(clusters[j].first_seen),
                );
                if best.as_ref().map_or(true, |(incumbent, _)| is_better(key, *incumbent)) {
                    best = Some((key, (i, j)));
                }
            }
        }

        let Some((_, (i, j))) = best else { break };

        let absorbed = clusters.remove(j);
        let target = &mut clusters[i];
        target.members.extend(absorbed.members);
        target.min_camera_id = target.min_camera_id.min(absorbed.min_camera_id);
        target.first_seen = target.first_seen.min(absorbed.first_seen);
        let locations: Vec<GeoPoint> = target
            .members
            .iter()
            .map(|&m| sightings[m].location())
            .collect();
        target.centroid = geo::mean_center(&locations);
    }

    clusters
        .into_iter()
        .map(|mut cluster| {
            cluster.members.sort_unstable();
            let max_member_distance = cluster
                .members
                .iter()
                .map(|&m| geo::haversine_distance(&cluster.centroid, &sightings[m].location()))
                .fold(0.0, f64::max);
            ZoneCluster {
                members: cluster.members,
                centroid: cluster.centroid,
                radius_meters: max_member_distance.max(settings.min_zone_radius_meters),
                min_camera_id: cluster.min_camera_id,
                first_seen: cluster.first_seen,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhotoId;
    use chrono::NaiveDate;

    const BASE_LAT: f64 = 45.0;
    const BASE_LON: f64 = -93.0;
    const METERS_PER_DEG_LAT: f64 = 111_320.0;

    fn settings() -> ClusterSettings {
        ClusterSettings::default()
    }

    /// Sighting offset north/east of the base corner by the given meters.
    fn sighting_at(
        photo_id: i64,
        camera_id: i64,
        hour: u32,
        north_m: f64,
        east_m: f64,
    ) -> Sighting {
        Sighting {
            photo_id: PhotoId::new(photo_id),
            captured_at: NaiveDate::from_ymd_opt(2025, 10, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            camera_id: CameraId::new(camera_id),
            camera_name: format!("Cam {}", camera_id),
            latitude: BASE_LAT + north_m / METERS_PER_DEG_LAT,
            longitude: BASE_LON + east_m / (METERS_PER_DEG_LAT * BASE_LAT.to_radians().cos()),
        }
    }

    #[test]
    fn test_empty_segment_yields_no_clusters() {
        assert!(cluster_sightings(&[], &settings()).is_empty());
    }

    #[test]
    fn test_single_sighting_gets_floor_radius() {
        let clusters = cluster_sightings(&[sighting_at(1, 1, 8, 0.0, 0.0)], &settings());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].sighting_count(), 1);
        assert_eq!(clusters[0].radius_meters, settings().min_zone_radius_meters);
    }

    #[test]
    fn test_nearby_sightings_merge() {
        let sightings = vec![
            sighting_at(1, 1, 8, 0.0, 0.0),
            sighting_at(2, 1, 9, 40.0, 0.0),
            sighting_at(3, 2, 10, 80.0, 0.0),
        ];
        let clusters = cluster_sightings(&sightings, &settings());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].sighting_count(), 3);
        assert_eq!(clusters[0].members, vec![0, 1, 2]);
        // centroid is the mean: 40 m north of the base corner
        let expected_lat = BASE_LAT + 40.0 / METERS_PER_DEG_LAT;
        assert!((clusters[0].centroid.latitude - expected_lat).abs() < 1e-9);
    }

    #[test]
    fn test_distant_sightings_stay_apart() {
        let sightings = vec![
            sighting_at(1, 1, 8, 0.0, 0.0),
            sighting_at(2, 2, 9, 500.0, 0.0),
        ];
        let clusters = cluster_sightings(&sightings, &settings());
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.sighting_count() == 1));
    }

    #[test]
    fn test_radius_covers_furthest_member() {
        let sightings = vec![
            sighting_at(1, 1, 8, 0.0, 0.0),
            sighting_at(2, 1, 9, 100.0, 0.0),
        ];
        let clusters = cluster_sightings(&sightings, &settings());
        assert_eq!(clusters.len(), 1);
        // members sit 50 m from the midpoint centroid
        assert!((clusters[0].radius_meters - 50.0).abs() < 1.0);
    }

    #[test]
    fn test_equal_distance_tie_resolved_by_capture_time() {
        // A-B and B-C are both 100 m pairs; A carries the earliest capture,
        // so A-B merges first. Their midpoint then sits 150 m from C, which
        // is outside a 120 m threshold.
        let sightings = vec![
            sighting_at(1, 3, 6, 0.0, 0.0),
            sighting_at(2, 1, 9, 100.0, 0.0),
            sighting_at(3, 2, 12, 200.0, 0.0),
        ];
        let tight = ClusterSettings {
            merge_threshold_meters: 120.0,
            ..ClusterSettings::default()
        };
        let clusters = cluster_sightings(&sightings, &tight);
        assert_eq!(clusters.len(), 2);
        let mut counts: Vec<usize> = clusters.iter().map(|c| c.sighting_count()).collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![1, 2]);
        let pair = clusters.iter().find(|c| c.sighting_count() == 2).unwrap();
        assert_eq!(pair.members, vec![0, 1]);
    }

    #[test]
    fn test_clustering_is_idempotent_on_its_own_output() {
        let sightings = vec![
            sighting_at(1, 1, 8, 0.0, 0.0),
            sighting_at(2, 1, 9, 60.0, 0.0),
            sighting_at(3, 2, 10, 400.0, 0.0),
            sighting_at(4, 2, 11, 460.0, 0.0),
        ];
        let first_pass = cluster_sightings(&sightings, &settings());
        assert_eq!(first_pass.len(), 2);

        // re-run the clusterer on the zone centroids as single points
        let reclustered_input: Vec<Sighting> = first_pass
            .iter()
            .enumerate()
            .map(|(i, cluster)| Sighting {
                photo_id: PhotoId::new(100 + i as i64),
                captured_at: cluster.first_seen,
                camera_id: cluster.min_camera_id,
                camera_name: "Centroid".to_string(),
                latitude: cluster.centroid.latitude,
                longitude: cluster.centroid.longitude,
            })
            .collect();
        let second_pass = cluster_sightings(&reclustered_input, &settings());

        assert_eq!(second_pass.len(), first_pass.len());
        for (a, b) in first_pass.iter().zip(second_pass.iter()) {
            assert!((a.centroid.latitude - b.centroid.latitude).abs() < 1e-9);
            assert!((a.centroid.longitude - b.centroid.longitude).abs() < 1e-9);
        }
    }
}
