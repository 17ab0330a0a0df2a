//! Profile and property lookup shapes provided by the storage collaborator.

use serde::{Deserialize, Serialize};

use super::ids::{ProfileId, PropertyId, TagId};

/// A tracked animal, identified by a photo tag and scoped to one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub profile_id: ProfileId,
    pub name: String,
    pub property_id: PropertyId,
    pub property_name: String,
    pub tag_id: TagId,
}

/// Per-property day-part configuration.
///
/// Hours are 24h local wall-clock values in 0-23. The pair drives the
/// [`crate::segments::SegmentTable`] derivation; `day_start_hour ==
/// night_start_hour` is a degenerate partition and rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyConfig {
    pub day_start_hour: u8,
    pub night_start_hour: u8,
}
