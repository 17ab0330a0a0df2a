//! Repository traits for the storage collaborators.
//!
//! These traits define the engine's entire interface to persistence. The
//! engine only ever reads: profile lookup, property configuration lookup,
//! and the sighting history filtered to the profile's tag. Implementations
//! (production database, in-memory local backend) are swapped via dependency
//! injection.

use async_trait::async_trait;

use crate::models::{Profile, ProfileId, PropertyConfig, PropertyId, Sighting};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::InternalError(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::InternalError(s.to_string())
    }
}

/// Profile and property lookups.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a repository can be shared
/// across concurrent prediction runs.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Check if the storage connection is healthy.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Resolve a tracked-animal profile.
    ///
    /// # Returns
    /// * `Ok(Profile)` - the profile with its property linkage
    /// * `Err(RepositoryError::NotFound)` - if the profile doesn't exist
    async fn get_profile(&self, profile_id: ProfileId) -> RepositoryResult<Profile>;

    /// Fetch the day-part configuration of a property.
    ///
    /// # Returns
    /// * `Ok(PropertyConfig)` - the configured day/night start hours
    /// * `Err(RepositoryError::NotFound)` - if the property doesn't exist
    async fn get_property_config(
        &self,
        property_id: PropertyId,
    ) -> RepositoryResult<PropertyConfig>;
}

/// Sighting history lookup.
#[async_trait]
pub trait SightingRepository: Send + Sync {
    /// Fetch the full sighting history for a profile, filtered to photos
    /// tagged with the profile's tag, ordered by capture time ascending.
    ///
    /// An empty history is a valid result, not an error; profiles with no
    /// sightings yet are an expected, common state.
    async fn fetch_sightings_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> RepositoryResult<Vec<Sighting>>;
}

/// Combination trait for callers that need the full history surface.
pub trait HistoryRepository: ProfileRepository + SightingRepository {}

impl<T: ProfileRepository + SightingRepository> HistoryRepository for T {}
