//! In-memory store for testing.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{error::Result, store::VideoStore, types::VideoRecord};

/// In-memory store backed by `HashMap`. No persistence — for tests only.
pub struct InMemoryVideoStore {
    videos: Mutex<HashMap<String, VideoRecord>>,
}

impl InMemoryVideoStore {
    pub fn new() -> Self {
        Self {
            videos: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryVideoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn upsert(&self, record: &VideoRecord) -> Result<VideoRecord> {
        let mut videos = self.videos.lock().unwrap_or_else(|e| e.into_inner());
        videos.insert(record.video_id.clone(), record.clone());
        Ok(record.clone())
    }

    async fn get(&self, video_id: &str) -> Result<Option<VideoRecord>> {
        let videos = self.videos.lock().unwrap_or_else(|e| e.into_inner());
        Ok(videos.get(video_id).cloned())
    }

    async fn list_recent(&self, limit: Option<u32>) -> Result<Vec<VideoRecord>> {
        let videos = self.videos.lock().unwrap_or_else(|e| e.into_inner());
        let mut records: Vec<VideoRecord> = videos.values().cloned().collect();
        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        if let Some(limit) = limit {
            records.truncate(limit as usize);
        }
        Ok(records)
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut videos = self.videos.lock().unwrap_or_else(|e| e.into_inner());
        let removed = videos.len() as u64;
        videos.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64> {
        let videos = self.videos.lock().unwrap_or_else(|e| e.into_inner());
        Ok(videos.len() as u64)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, chrono::TimeZone, chrono::Utc};

    fn make_record(video_id: &str, day: u32) -> VideoRecord {
        VideoRecord {
            video_id: video_id.into(),
            title: format!("Sermon {video_id}"),
            description: String::new(),
            thumbnail_url: None,
            published_at: Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap(),
            channel_id: "UCchannel000000000000000".into(),
        }
    }

    #[tokio::test]
    async fn test_upsert_get_roundtrip() {
        let store = InMemoryVideoStore::new();
        store.upsert(&make_record("v1", 1)).await.unwrap();

        let found = store.get("v1").await.unwrap().unwrap();
        assert_eq!(found.video_id, "v1");
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let store = InMemoryVideoStore::new();
        store.upsert(&make_record("v1", 1)).await.unwrap();

        let mut updated = make_record("v1", 1);
        updated.title = "renamed".into();
        store.upsert(&updated).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.get("v1").await.unwrap().unwrap().title, "renamed");
    }

    #[tokio::test]
    async fn test_list_recent_sorted_and_limited() {
        let store = InMemoryVideoStore::new();
        for (id, day) in [("v1", 3), ("v2", 9), ("v3", 6)] {
            store.upsert(&make_record(id, day)).await.unwrap();
        }

        let all = store.list_recent(None).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, ["v2", "v3", "v1"]);

        let top = store.list_recent(Some(1)).await.unwrap();
        assert_eq!(top[0].video_id, "v2");
    }

    #[tokio::test]
    async fn test_delete_all() {
        let store = InMemoryVideoStore::new();
        store.upsert(&make_record("v1", 1)).await.unwrap();
        store.upsert(&make_record("v2", 2)).await.unwrap();

        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.list_recent(None).await.unwrap().is_empty());
    }
}
