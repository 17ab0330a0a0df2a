//! Checksum of a profile's sighting history.
//!
//! The engine does not cache results; callers that do are expected to key
//! their cache by (profile id, data version). This hash is the data-version
//! half of that key: it changes exactly when the history changes.

use sha2::{Digest, Sha256};

use crate::models::Sighting;

/// SHA-256 over the ordered (photo id, capture time) history, hex encoded.
pub fn history_checksum(sightings: &[Sighting]) -> String {
    let mut hasher = Sha256::new();
    for sighting in sightings {
        hasher.update(sighting.photo_id.value().to_le_bytes());
        hasher.update(sighting.captured_at.and_utc().timestamp().to_le_bytes());
    }
    hex::encode(hasher.finalize())
}
