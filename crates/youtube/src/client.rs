//! Thin typed client over the YouTube Data API v3 endpoints the sync engine
//! uses.

use std::time::Duration;

use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{ChannelListResponse, SearchItem, SearchResponse, VideoListResponse, VideoStatusItem},
};

/// Public API base. Tests point [`YoutubeClient::with_base_url`] at a mock
/// server instead.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Bound on every individual API call; a stuck upstream must not stall a
/// whole sync pass indefinitely.
const CALL_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("steeple/", env!("CARGO_PKG_VERSION"));

/// Typed access to the video-hosting API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YoutubeClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(CALL_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// A channel's most recent uploads, newest first (`/search`).
    pub async fn search_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Vec<SearchItem>> {
        let max_results = max_results.to_string();
        let resp = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("channelId", channel_id),
                ("part", "snippet"),
                ("order", "date"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let items = resp.json::<SearchResponse>().await?.items;
        debug!(channel_id, count = items.len(), "video search returned");
        Ok(items)
    }

    /// Status flags for a batch of video IDs (`/videos`).
    pub async fn video_statuses(&self, ids: &[String]) -> Result<Vec<VideoStatusItem>> {
        let ids_param = ids.join(",");
        let resp = self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("id", ids_param.as_str()),
                ("part", "status,contentDetails"),
            ])
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json::<VideoListResponse>().await?.items)
    }

    /// Stable channel ID for a handle (`/channels?forHandle=`), if any.
    pub async fn channel_id_for_handle(&self, handle: &str) -> Result<Option<String>> {
        let resp = self
            .http
            .get(format!("{}/channels", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("forHandle", handle),
                ("part", "id"),
            ])
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let items = resp.json::<ChannelListResponse>().await?.items;
        Ok(items
            .into_iter()
            .map(|c| c.id)
            .find(|id| !id.is_empty()))
    }

    /// First channel ID matching a free-text search (`/search?type=channel`),
    /// if any.
    pub async fn search_channel(&self, query: &str) -> Result<Option<String>> {
        let resp = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("type", "channel"),
                ("part", "snippet"),
                ("maxResults", "1"),
            ])
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let items = resp.json::<SearchResponse>().await?.items;
        Ok(items
            .into_iter()
            .map(|item| item.id.channel_id)
            .find(|id| !id.is_empty()))
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::api(status, body))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {mockito::Matcher, serde_json::json};

    use super::*;

    fn query_param(key: &str, value: &str) -> Matcher {
        Matcher::UrlEncoded(key.into(), value.into())
    }

    #[tokio::test]
    async fn test_search_videos_parses_items() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                query_param("key", "test-key"),
                query_param("channelId", "UCabc"),
                query_param("order", "date"),
                query_param("type", "video"),
                query_param("maxResults", "10"),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "items": [
                        {
                            "id": {"kind": "youtube#video", "videoId": "v1"},
                            "snippet": {
                                "title": "Sunday Service",
                                "description": "Live from the main altar",
                                "publishedAt": "2024-03-03T10:00:00Z",
                                "thumbnails": {"high": {"url": "https://img/v1.jpg"}}
                            }
                        },
                        {
                            "id": {"kind": "youtube#video", "videoId": "v2"},
                            "snippet": {
                                "title": "Midweek Prayers",
                                "publishedAt": "2024-03-01T18:00:00Z"
                            }
                        }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let items = client.search_videos("UCabc", 10).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.video_id, "v1");
        assert_eq!(items[0].snippet.title, "Sunday Service");
        assert_eq!(
            items[0].snippet.thumbnails.high.as_ref().unwrap().url,
            "https://img/v1.jpg"
        );
        assert_eq!(items[1].snippet.description, "");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_videos_maps_api_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"error": {"message": "quotaExceeded"}}"#)
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let err = client.search_videos("UCabc", 10).await.unwrap_err();

        match err {
            Error::Api { status, message } => {
                assert_eq!(status.as_u16(), 403);
                assert!(message.contains("quotaExceeded"));
            },
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_video_statuses_joins_ids() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/videos")
            .match_query(Matcher::AllOf(vec![
                query_param("id", "v1,v2"),
                query_param("part", "status,contentDetails"),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "items": [
                        {"id": "v1", "status": {"embeddable": true, "privacyStatus": "public"}},
                        {"id": "v2", "status": {"embeddable": false, "privacyStatus": "public"}}
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let statuses = client
            .video_statuses(&["v1".into(), "v2".into()])
            .await
            .unwrap();

        assert_eq!(statuses.len(), 2);
        assert!(statuses[0].status.is_eligible());
        assert!(!statuses[1].status.is_eligible());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_channel_id_for_handle_found() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/channels")
            .match_query(Matcher::AllOf(vec![
                query_param("forHandle", "@repentpreparetheway"),
                query_param("part", "id"),
            ]))
            .with_status(200)
            .with_body(json!({"items": [{"id": "UCqdgi-yU4fVlOhKZLrz24rw"}]}).to_string())
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let id = client
            .channel_id_for_handle("@repentpreparetheway")
            .await
            .unwrap();

        assert_eq!(id.as_deref(), Some("UCqdgi-yU4fVlOhKZLrz24rw"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_channel_id_for_handle_no_match() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/channels")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        assert!(client.channel_id_for_handle("@ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_channel_takes_first_hit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                query_param("q", "@kayole"),
                query_param("type", "channel"),
                query_param("maxResults", "1"),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "items": [{"id": {"kind": "youtube#channel", "channelId": "UCuJUQh03Zub62Vv8uZd9SWA"}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = YoutubeClient::with_base_url("test-key", server.url()).unwrap();
        let id = client.search_channel("@kayole").await.unwrap();

        assert_eq!(id.as_deref(), Some("UCuJUQh03Zub62Vv8uZd9SWA"));
        mock.assert_async().await;
    }
}
