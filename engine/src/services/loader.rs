//! Sighting history loading.
//!
//! Thin data-access adapters over the repository traits; no business logic
//! beyond re-asserting the capture ordering downstream steps rely on.

use log::info;

use crate::db::repository::{
    ProfileRepository, RepositoryResult, SightingRepository,
};
use crate::models::{Profile, ProfileId, PropertyConfig, Sighting};

/// Resolve a profile and its property's day-part configuration.
///
/// # Returns
/// * `Ok((Profile, PropertyConfig))` on success
/// * `Err(RepositoryError::NotFound)` if the profile or property is missing
pub async fn load_profile<R: ProfileRepository>(
    repo: &R,
    profile_id: ProfileId,
) -> RepositoryResult<(Profile, PropertyConfig)> {
    let profile = repo.get_profile(profile_id).await?;
    let config = repo.get_property_config(profile.property_id).await?;
    Ok((profile, config))
}

/// Load the full ordered sighting history for a profile.
///
/// An empty history is a valid result. Ordering by capture time (photo id
/// as the final tie) is re-applied here rather than trusted from storage.
pub async fn load_sightings<R: SightingRepository>(
    repo: &R,
    profile_id: ProfileId,
) -> RepositoryResult<Vec<Sighting>> {
    let mut sightings = repo.fetch_sightings_for_profile(profile_id).await?;
    sightings.sort_by(|a, b| {
        a.captured_at
            .cmp(&b.captured_at)
            .then(a.photo_id.value().cmp(&b.photo_id.value()))
    });
    info!(
        "Loaded {} sightings for profile {}",
        sightings.len(),
        profile_id.value()
    );
    Ok(sightings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepositoryError;
    use crate::db::LocalRepository;
    use crate::models::{CameraId, PhotoId, PropertyId, TagId};
    use chrono::NaiveDate;

    fn seed_profile(repo: &LocalRepository) -> ProfileId {
        repo.store_profile_impl(
            Profile {
                profile_id: ProfileId::new(0),
                name: "Split Brow".to_string(),
                property_id: PropertyId::new(1),
                property_name: "Cedar Ridge".to_string(),
                tag_id: TagId::new(11),
            },
            PropertyConfig {
                day_start_hour: 6,
                night_start_hour: 20,
            },
        )
    }

    fn sighting(photo_id: i64, day: u32, hour: u32) -> Sighting {
        Sighting {
            photo_id: PhotoId::new(photo_id),
            captured_at: NaiveDate::from_ymd_opt(2025, 10, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            camera_id: CameraId::new(1),
            camera_name: "North Field Cam".to_string(),
            latitude: 45.0,
            longitude: -93.0,
        }
    }

    #[tokio::test]
    async fn test_load_profile_with_config() {
        let repo = LocalRepository::new();
        let id = seed_profile(&repo);
        let (profile, config) = load_profile(&repo, id).await.unwrap();
        assert_eq!(profile.name, "Split Brow");
        assert_eq!(config.day_start_hour, 6);
    }

    #[tokio::test]
    async fn test_unknown_profile_fails() {
        let repo = LocalRepository::new();
        let err = load_profile(&repo, ProfileId::new(99)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_history_sorted_ascending() {
        let repo = LocalRepository::new();
        let id = seed_profile(&repo);
        repo.store_sightings_impl(id, vec![sighting(2, 3, 7), sighting(1, 1, 18)]);

        let history = load_sightings(&repo, id).await.unwrap();
        assert_eq!(history[0].photo_id.value(), 1);
        assert_eq!(history[1].photo_id.value(), 2);
    }

    #[tokio::test]
    async fn test_no_sightings_is_empty_not_error() {
        let repo = LocalRepository::new();
        let id = seed_profile(&repo);
        let history = load_sightings(&repo, id).await.unwrap();
        assert!(history.is_empty());
    }
}
