//! Eligible-video fetching for one channel.
//!
//! Two API calls per channel: a search for the most recent uploads, then a
//! bulk status lookup over the returned IDs. Only items that are both
//! embeddable and public survive; the app cannot play anything else, so
//! ineligible items are dropped before they reach the cache.

use std::collections::HashSet;

use {
    chrono::{DateTime, Utc},
    steeple_store::VideoRecord,
    tracing::{debug, warn},
};

use crate::{client::YoutubeClient, error::Result, types::SearchItem};

/// Fetch a channel's recent eligible videos, newest first.
///
/// Returns an empty vec when the channel has no uploads. Errors from either
/// API call propagate so the caller can skip the channel for this pass;
/// the rest of the sync run is unaffected.
pub async fn fetch_videos(
    client: &YoutubeClient,
    channel_id: &str,
    max_results: u32,
) -> Result<Vec<VideoRecord>> {
    let items = client.search_videos(channel_id, max_results).await?;

    let ids: Vec<String> = items
        .iter()
        .map(|item| item.id.video_id.clone())
        .filter(|id| !id.is_empty())
        .collect();
    if ids.is_empty() {
        debug!(channel_id, "no uploads found");
        return Ok(Vec::new());
    }

    let statuses = client.video_statuses(&ids).await?;
    let eligible: HashSet<&str> = statuses
        .iter()
        .filter(|item| item.status.is_eligible())
        .map(|item| item.id.as_str())
        .collect();

    let records: Vec<VideoRecord> = items
        .iter()
        .filter(|item| eligible.contains(item.id.video_id.as_str()))
        .map(|item| to_record(item, channel_id))
        .collect();

    debug!(
        channel_id,
        fetched = items.len(),
        eligible = records.len(),
        "filtered channel uploads"
    );
    Ok(records)
}

/// Map one search hit to a cache record. `channel_id` is always the stable
/// ID the fetch was issued for, never a handle.
///
/// An unparseable `publishedAt` falls back to the epoch: the video is still
/// playable, so one malformed field must not hide it from the cache. It
/// merely sorts last.
fn to_record(item: &SearchItem, channel_id: &str) -> VideoRecord {
    let published_at = match DateTime::parse_from_rfc3339(&item.snippet.published_at) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(error) => {
            warn!(
                video_id = %item.id.video_id,
                published_at = %item.snippet.published_at,
                %error,
                "unparseable publish date, caching with epoch timestamp"
            );
            DateTime::<Utc>::UNIX_EPOCH
        },
    };
    let thumbnail_url = item
        .snippet
        .thumbnails
        .high
        .as_ref()
        .or(item.snippet.thumbnails.default.as_ref())
        .map(|t| t.url.clone());

    VideoRecord {
        video_id: item.id.video_id.clone(),
        title: item.snippet.title.clone(),
        description: item.snippet.description.clone(),
        thumbnail_url,
        published_at,
        channel_id: channel_id.to_string(),
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {mockito::Matcher, serde_json::json};

    use super::*;

    fn search_body() -> String {
        json!({
            "items": [
                {
                    "id": {"videoId": "v1"},
                    "snippet": {
                        "title": "Sunday Service",
                        "description": "Live worship",
                        "publishedAt": "2024-03-03T10:00:00Z",
                        "thumbnails": {"high": {"url": "https://img/v1.jpg"}}
                    }
                },
                {
                    "id": {"videoId": "v2"},
                    "snippet": {
                        "title": "Members Only Stream",
                        "publishedAt": "2024-03-01T18:00:00Z"
                    }
                }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_keeps_only_embeddable_public_items() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("channelId".into(), "UCabc".into()))
            .with_status(200)
            .with_body(search_body())
            .create_async()
            .await;
        let statuses = server
            .mock("GET", "/videos")
            .match_query(Matcher::UrlEncoded("id".into(), "v1,v2".into()))
            .with_status(200)
            .with_body(
                json!({
                    "items": [
                        {"id": "v1", "status": {"embeddable": true, "privacyStatus": "public"}},
                        {"id": "v2", "status": {"embeddable": true, "privacyStatus": "private"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let records = fetch_videos(&client, "UCabc", 10).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "v1");
        assert_eq!(records[0].title, "Sunday Service");
        assert_eq!(records[0].channel_id, "UCabc");
        assert_eq!(records[0].thumbnail_url.as_deref(), Some("https://img/v1.jpg"));
        statuses.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_embeddable_items_are_dropped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(search_body())
            .create_async()
            .await;
        server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "items": [
                        {"id": "v1", "status": {"embeddable": false, "privacyStatus": "public"}},
                        {"id": "v2", "status": {"embeddable": true, "privacyStatus": "private"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let records = fetch_videos(&client, "UCabc", 10).await.unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_skips_status_lookup() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;
        let statuses = server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let records = fetch_videos(&client, "UCabc", 10).await.unwrap();

        assert!(records.is_empty());
        statuses.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_error_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        assert!(fetch_videos(&client, "UCabc", 10).await.is_err());
    }

    #[tokio::test]
    async fn test_status_error_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(search_body())
            .create_async()
            .await;
        server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"message": "quotaExceeded"}}"#)
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        assert!(fetch_videos(&client, "UCabc", 10).await.is_err());
    }

    #[tokio::test]
    async fn test_unparseable_publish_date_falls_back_to_epoch() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "items": [
                        {
                            "id": {"videoId": "good"},
                            "snippet": {"title": "ok", "publishedAt": "2024-03-03T10:00:00Z"}
                        },
                        {
                            "id": {"videoId": "bad"},
                            "snippet": {"title": "broken", "publishedAt": "last tuesday"}
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;
        server
            .mock("GET", "/videos")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({
                    "items": [
                        {"id": "good", "status": {"embeddable": true, "privacyStatus": "public"}},
                        {"id": "bad", "status": {"embeddable": true, "privacyStatus": "public"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let records = fetch_videos(&client, "UCabc", 10).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].video_id, "good");
        let bad = &records[1];
        assert_eq!(bad.video_id, "bad");
        assert_eq!(bad.published_at, DateTime::<Utc>::UNIX_EPOCH);
    }
}
