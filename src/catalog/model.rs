//! Catalog records consumed by the player.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Station id the catalog understands as "pick something for me".
pub const LUCKY_STATION_ID: &str = "IFL";

/// A raw track entry as listed by a playlist or station.
///
/// Only the identifier fields are read; everything else in the record is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackRef {
    #[serde(rename = "storeId")]
    pub store_id: Option<String>,
    pub nid: Option<String>,
    #[serde(rename = "trackId")]
    pub track_id: Option<String>,
}

/// Canonical identifier used for every catalog call about a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A browsable playlist or station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    /// Playlists carry their entries inline; stations list them on demand.
    #[serde(default)]
    pub tracks: Vec<TrackRef>,
}

/// Descriptive information about one track. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub album: Option<String>,
    pub artist: Option<String>,
    #[serde(
        rename = "durationMillis",
        default,
        deserialize_with = "deserialize_millis"
    )]
    pub duration_ms: Option<u64>,
}

impl Metadata {
    /// Placeholder used when the metadata call failed.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Millis {
    Number(u64),
    Text(String),
}

/// Accept `durationMillis` both as a JSON number and as a numeric string.
fn deserialize_millis<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Millis>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Millis::Number(ms)) => Ok(Some(ms)),
        Some(Millis::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
