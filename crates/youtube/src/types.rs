//! Wire types for the YouTube Data API v3 responses.
//!
//! Everything is `#[serde(default)]` so partial or surprising payloads decode
//! to empty values instead of failing the whole call.

use serde::Deserialize;

/// `/search` response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
}

/// One `/search` hit (a video or a channel, depending on the `type` filter).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: Snippet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchItemId {
    pub video_id: String,
    pub channel_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snippet {
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
}

/// `/videos` response envelope (bulk status lookup).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoListResponse {
    pub items: Vec<VideoStatusItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoStatusItem {
    pub id: String,
    pub status: VideoStatus,
}

/// Upstream visibility flags.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoStatus {
    pub embeddable: bool,
    pub privacy_status: String,
}

impl VideoStatus {
    /// Playable in the app: embeddable and publicly visible. Anything else
    /// is dropped before it reaches the cache.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.embeddable && self.privacy_status == "public"
    }
}

/// `/channels` response envelope (handle lookup).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelListResponse {
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelItem {
    pub id: String,
}
