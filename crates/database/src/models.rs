//! Database models.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Open-ended profile fields: string keys to arbitrary JSON values.
pub type ProfileData = serde_json::Map<String, serde_json::Value>;

/// A stored worker profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Auto-incrementing ID, assigned on insert.
    pub id: i64,
    /// Contact phone number, if known.
    pub phone_number: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Extracted fields, including the raw transcript when built from audio.
    pub profile_data: ProfileData,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Fields supplied when creating a profile.
///
/// Every field is optional in request bodies; a missing or `null`
/// `profile_data` becomes an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub profile_data: ProfileData,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<ProfileData, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ProfileData>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl NewProfile {
    /// A profile with a name and extracted data, as built from a transcript.
    pub fn named(name: impl Into<String>, profile_data: ProfileData) -> Self {
        Self {
            phone_number: None,
            name: Some(name.into()),
            profile_data,
        }
    }
}

/// Row shape of the `profiles` table.
#[derive(Debug, FromRow)]
pub(crate) struct ProfileRow {
    pub id: i64,
    pub phone_number: Option<String>,
    pub name: Option<String>,
    pub profile_data: Json<ProfileData>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            phone_number: row.phone_number,
            name: row.name,
            profile_data: row.profile_data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
