//! Core data types for the video cache.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// A single cached video.
///
/// `video_id` is the upstream natural key and is globally unique across all
/// channels; a record arriving twice with the same `video_id` overwrites the
/// previous row rather than duplicating it. `channel_id` always holds the
/// stable channel identifier, never a handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub channel_id: String,
}
