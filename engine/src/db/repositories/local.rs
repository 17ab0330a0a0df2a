//! In-memory local repository implementation.
//!
//! Stores profiles, property configurations and sighting histories in plain
//! maps behind an `RwLock`, giving unit tests and local development a fast,
//! deterministic, isolated backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::repository::{
    ProfileRepository, RepositoryError, RepositoryResult, SightingRepository,
};
use crate::models::{Profile, ProfileId, PropertyConfig, PropertyId, Sighting};

/// In-memory local repository.
///
/// # Example
/// ```
/// use trailcast::db::LocalRepository;
///
/// let repo = LocalRepository::new();
/// // Seed with test data via store_profile_impl / store_sightings_impl,
/// // then hand the repo to the prediction orchestrator.
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    profiles: HashMap<ProfileId, Profile>,
    property_configs: HashMap<PropertyId, PropertyConfig>,
    sightings: HashMap<ProfileId, Vec<Sighting>>,
    next_profile_id: i64,
    is_healthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                next_profile_id: 1,
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Add a profile and its property configuration.
    ///
    /// The profile is assigned an id automatically (any id on the argument
    /// is overwritten).
    ///
    /// # Returns
    /// The id assigned to the profile.
    pub fn store_profile_impl(&self, mut profile: Profile, config: PropertyConfig) -> ProfileId {
        let mut data = self.data.write().unwrap();
        let id = ProfileId::new(data.next_profile_id);
        data.next_profile_id += 1;
        profile.profile_id = id;
        data.property_configs.insert(profile.property_id, config);
        data.profiles.insert(id, profile);
        id
    }

    /// Append one sighting to a profile's history.
    pub fn store_sighting_impl(&self, profile_id: ProfileId, sighting: Sighting) {
        let mut data = self.data.write().unwrap();
        data.sightings.entry(profile_id).or_default().push(sighting);
    }

    /// Append a batch of sightings to a profile's history.
    pub fn store_sightings_impl(&self, profile_id: ProfileId, sightings: Vec<Sighting>) {
        let mut data = self.data.write().unwrap();
        data.sightings
            .entry(profile_id)
            .or_default()
            .extend(sightings);
    }

    /// Toggle the simulated connection health.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Remove all stored data.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        data.profiles.clear();
        data.property_configs.clear();
        data.sightings.clear();
        data.next_profile_id = 1;
    }

    pub fn profile_count(&self) -> usize {
        self.data.read().unwrap().profiles.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Repository is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn get_profile(&self, profile_id: ProfileId) -> RepositoryResult<Profile> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.profiles.get(&profile_id).cloned().ok_or_else(|| {
            RepositoryError::NotFound(format!("Profile {} not found", profile_id.value()))
        })
    }

    async fn get_property_config(
        &self,
        property_id: PropertyId,
    ) -> RepositoryResult<PropertyConfig> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.property_configs
            .get(&property_id)
            .copied()
            .ok_or_else(|| {
                RepositoryError::NotFound(format!("Property {} not found", property_id.value()))
            })
    }
}

#[async_trait]
impl SightingRepository for LocalRepository {
    async fn fetch_sightings_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> RepositoryResult<Vec<Sighting>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut sightings = data.sightings.get(&profile_id).cloned().unwrap_or_default();
        sightings.sort_by(|a, b| {
            a.captured_at
                .cmp(&b.captured_at)
                .then(a.photo_id.value().cmp(&b.photo_id.value()))
        });
        Ok(sightings)
    }
}
